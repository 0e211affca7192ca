use std::sync::Arc;

use async_trait::async_trait;
use common::error::{AppError, Res};
use common::misc::ApplicationStatus;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use crate::dtos::application::{
    ApplicationWithApplicant, ApplicationWithJob, JobWithApplicants, NewApplication,
};
use crate::dtos::company::NewCompany;
use crate::dtos::job::{JobWithApplications, JobWithCompany, NewJob};
use crate::dtos::user::{NewUser, PublicUser};
use crate::models::application::Application;
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::user::{AuthCredentials, User};
use crate::store::{ApplicationStore, CompanyStore, JobStore, UserStore};

/// Postgres-backed store. Populate-style reads are expressed as joins with
/// prefixed column aliases and mapped by hand.
#[derive(Clone)]
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        PgStore { pool }
    }
}

// Aliased column lists for the join queries below. Prefixes keep the three
// entities apart in a single row.
const JOB_COLS: &str = "j.id AS j_id, j.title AS j_title, j.description AS j_description, \
    j.requirements AS j_requirements, j.salary AS j_salary, j.location AS j_location, \
    j.job_type AS j_job_type, j.experience_level AS j_experience_level, \
    j.\"position\" AS j_position, j.company_id AS j_company_id, j.created_by AS j_created_by, \
    j.created_at AS j_created_at, j.updated_at AS j_updated_at";

const COMPANY_COLS: &str = "c.id AS c_id, c.name AS c_name, c.description AS c_description, \
    c.website AS c_website, c.location AS c_location, c.logo AS c_logo, c.user_id AS c_user_id, \
    c.created_at AS c_created_at, c.updated_at AS c_updated_at";

const APPLICATION_COLS: &str = "a.id AS a_id, a.job_id AS a_job_id, \
    a.applicant_id AS a_applicant_id, a.status AS a_status, a.created_at AS a_created_at, \
    a.updated_at AS a_updated_at";

const USER_COLS: &str = "u.id AS u_id, u.fullname AS u_fullname, u.email AS u_email, \
    u.phone_number AS u_phone_number, u.role AS u_role, u.bio AS u_bio, u.skills AS u_skills, \
    u.resume AS u_resume, u.resume_original_name AS u_resume_original_name, \
    u.profile_photo AS u_profile_photo, u.company_id AS u_company_id, \
    u.created_at AS u_created_at, u.updated_at AS u_updated_at";

fn map_job(row: &PgRow) -> Result<Job, sqlx::Error> {
    Ok(Job {
        id: row.try_get("j_id")?,
        title: row.try_get("j_title")?,
        description: row.try_get("j_description")?,
        requirements: row.try_get("j_requirements")?,
        salary: row.try_get("j_salary")?,
        location: row.try_get("j_location")?,
        job_type: row.try_get("j_job_type")?,
        experience_level: row.try_get("j_experience_level")?,
        position: row.try_get("j_position")?,
        company_id: row.try_get("j_company_id")?,
        created_by: row.try_get("j_created_by")?,
        created_at: row.try_get("j_created_at")?,
        updated_at: row.try_get("j_updated_at")?,
    })
}

fn map_company(row: &PgRow) -> Result<Company, sqlx::Error> {
    Ok(Company {
        id: row.try_get("c_id")?,
        name: row.try_get("c_name")?,
        description: row.try_get("c_description")?,
        website: row.try_get("c_website")?,
        location: row.try_get("c_location")?,
        logo: row.try_get("c_logo")?,
        user_id: row.try_get("c_user_id")?,
        created_at: row.try_get("c_created_at")?,
        updated_at: row.try_get("c_updated_at")?,
    })
}

fn map_application(row: &PgRow) -> Result<Application, sqlx::Error> {
    Ok(Application {
        id: row.try_get("a_id")?,
        job_id: row.try_get("a_job_id")?,
        applicant_id: row.try_get("a_applicant_id")?,
        status: row.try_get("a_status")?,
        created_at: row.try_get("a_created_at")?,
        updated_at: row.try_get("a_updated_at")?,
    })
}

fn map_user(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("u_id")?,
        fullname: row.try_get("u_fullname")?,
        email: row.try_get("u_email")?,
        phone_number: row.try_get("u_phone_number")?,
        role: row.try_get("u_role")?,
        bio: row.try_get("u_bio")?,
        skills: row.try_get("u_skills")?,
        resume: row.try_get("u_resume")?,
        resume_original_name: row.try_get("u_resume_original_name")?,
        profile_photo: row.try_get("u_profile_photo")?,
        company_id: row.try_get("u_company_id")?,
        created_at: row.try_get("u_created_at")?,
        updated_at: row.try_get("u_updated_at")?,
    })
}

/// Maps a unique-constraint violation to a Conflict so races lost against
/// the index answer the same 400 as the ordinary existence check.
fn conflict_on_unique(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn email_exists(&self, email: &str) -> Res<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&*self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Res<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_user_with_credentials(
        &self,
        email: &str,
    ) -> Res<Option<(User, AuthCredentials)>> {
        let row = sqlx::query(
            "SELECT u.*, ac.password_hash \
             FROM users u \
             JOIN auth_credentials ac ON ac.user_id = u.id \
             WHERE u.email = $1",
        )
        .bind(email)
        .fetch_optional(&*self.pool)
        .await?;

        match row {
            Some(row) => {
                let user = User::from_row(&row)?;
                let credentials = AuthCredentials {
                    user_id: user.id,
                    password_hash: row.try_get("password_hash")?,
                };
                Ok(Some((user, credentials)))
            }
            None => Ok(None),
        }
    }

    async fn insert_user(&self, data: NewUser, password_hash: String) -> Res<User> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (fullname, email, phone_number, role, profile_photo) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.fullname)
        .bind(&data.email)
        .bind(&data.phone_number)
        .bind(data.role.as_str())
        .bind(&data.profile_photo)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "User already exists with this email."))?;

        sqlx::query("INSERT INTO auth_credentials (user_id, password_hash) VALUES ($1, $2)")
            .bind(user.id)
            .bind(&password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Res<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET fullname = $2, email = $3, phone_number = $4, bio = $5, \
             skills = $6, resume = $7, resume_original_name = $8, profile_photo = $9, \
             company_id = $10, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.bio)
        .bind(&user.skills)
        .bind(&user.resume)
        .bind(&user.resume_original_name)
        .bind(&user.profile_photo)
        .bind(user.company_id)
        .fetch_one(&*self.pool)
        .await
        .map_err(AppError::from)
    }
}

#[async_trait]
impl CompanyStore for PgStore {
    async fn company_name_exists(&self, name: &str) -> Res<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM companies WHERE name = $1)")
            .bind(name)
            .fetch_one(&*self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn insert_company(&self, data: NewCompany) -> Res<Company> {
        sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name, user_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.user_id)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "You can't register the same company."))
    }

    async fn find_companies_by_owner(&self, user_id: Uuid) -> Res<Vec<Company>> {
        sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn find_company_by_id(&self, id: Uuid) -> Res<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update_company(&self, company: Company) -> Res<Company> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = $2, description = $3, website = $4, location = $5, \
             logo = $6, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.website)
        .bind(&company.location)
        .bind(&company.logo)
        .fetch_one(&*self.pool)
        .await
        .map_err(AppError::from)
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn insert_job(&self, data: NewJob) -> Res<Job> {
        sqlx::query_as::<_, Job>(
            "INSERT INTO jobs (title, description, requirements, salary, location, job_type, \
             experience_level, \"position\", company_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.requirements)
        .bind(data.salary)
        .bind(&data.location)
        .bind(&data.job_type)
        .bind(&data.experience_level)
        .bind(data.position)
        .bind(data.company_id)
        .bind(data.created_by)
        .fetch_one(&*self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn search_jobs(&self, keyword: &str) -> Res<Vec<JobWithCompany>> {
        let sql = format!(
            "SELECT {JOB_COLS}, {COMPANY_COLS} \
             FROM jobs j \
             JOIN companies c ON c.id = j.company_id \
             WHERE j.title ILIKE $1 OR j.description ILIKE $1 \
             ORDER BY j.created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(format!("%{}%", keyword))
            .fetch_all(&*self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(JobWithCompany {
                    job: map_job(row)?,
                    company: map_company(row)?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(AppError::from)
    }

    async fn find_job_by_id(&self, id: Uuid) -> Res<Option<Job>> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_job_with_applications(&self, id: Uuid) -> Res<Option<JobWithApplications>> {
        let Some(job) = self.find_job_by_id(id).await? else {
            return Ok(None);
        };

        let applications = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE job_id = $1 ORDER BY created_at DESC",
        )
        .bind(id)
        .fetch_all(&*self.pool)
        .await?;

        Ok(Some(JobWithApplications { job, applications }))
    }

    async fn find_jobs_by_creator(&self, user_id: Uuid) -> Res<Vec<JobWithCompany>> {
        let sql = format!(
            "SELECT {JOB_COLS}, {COMPANY_COLS} \
             FROM jobs j \
             JOIN companies c ON c.id = j.company_id \
             WHERE j.created_by = $1 \
             ORDER BY j.created_at DESC"
        );
        let rows = sqlx::query(&sql).bind(user_id).fetch_all(&*self.pool).await?;

        rows.iter()
            .map(|row| {
                Ok(JobWithCompany {
                    job: map_job(row)?,
                    company: map_company(row)?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(AppError::from)
    }

    async fn find_job_with_applicants(&self, id: Uuid) -> Res<Option<JobWithApplicants>> {
        let Some(job) = self.find_job_by_id(id).await? else {
            return Ok(None);
        };

        let sql = format!(
            "SELECT {APPLICATION_COLS}, {USER_COLS} \
             FROM applications a \
             JOIN users u ON u.id = a.applicant_id \
             WHERE a.job_id = $1 \
             ORDER BY a.created_at DESC"
        );
        let rows = sqlx::query(&sql).bind(id).fetch_all(&*self.pool).await?;

        let applications = rows
            .iter()
            .map(|row| {
                Ok(ApplicationWithApplicant {
                    application: map_application(row)?,
                    applicant: PublicUser::from(map_user(row)?),
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(Some(JobWithApplicants { job, applications }))
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn find_application(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> Res<Option<Application>> {
        sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE job_id = $1 AND applicant_id = $2",
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn insert_application(&self, data: NewApplication) -> Res<Application> {
        sqlx::query_as::<_, Application>(
            "INSERT INTO applications (job_id, applicant_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.job_id)
        .bind(data.applicant_id)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "You have already applied for this job."))
    }

    async fn find_applications_for_applicant(
        &self,
        applicant_id: Uuid,
    ) -> Res<Vec<ApplicationWithJob>> {
        let sql = format!(
            "SELECT {APPLICATION_COLS}, {JOB_COLS}, {COMPANY_COLS} \
             FROM applications a \
             JOIN jobs j ON j.id = a.job_id \
             JOIN companies c ON c.id = j.company_id \
             WHERE a.applicant_id = $1 \
             ORDER BY a.created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(applicant_id)
            .fetch_all(&*self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(ApplicationWithJob {
                    application: map_application(row)?,
                    job: JobWithCompany {
                        job: map_job(row)?,
                        company: map_company(row)?,
                    },
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(AppError::from)
    }

    async fn find_application_by_id(&self, id: Uuid) -> Res<Option<Application>> {
        sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn set_application_status(&self, id: Uuid, status: ApplicationStatus) -> Res<()> {
        sqlx::query("UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}
