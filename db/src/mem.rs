use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use common::error::{AppError, Res};
use common::misc::ApplicationStatus;
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

/// In-memory store with the same semantics as `PgStore`, including the
/// uniqueness constraints. Backs the service-level test suites; also usable
/// for local experiments without a Postgres instance.
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    credentials: HashMap<Uuid, String>,
    companies: HashMap<Uuid, Company>,
    jobs: HashMap<Uuid, Job>,
    applications: HashMap<Uuid, Application>,
    // insertion sequence per record id; tie-breaker for newest-first sorts
    // when timestamps collide within one test run
    seq: HashMap<Uuid, u64>,
    next_seq: u64,
}

impl Inner {
    fn stamp(&mut self, id: Uuid) {
        self.next_seq += 1;
        self.seq.insert(id, self.next_seq);
    }

    fn order_key(&self, id: Uuid, created_at: NaiveDateTime) -> (NaiveDateTime, u64) {
        (created_at, self.seq.get(&id).copied().unwrap_or(0))
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl UserStore for MemStore {
    async fn email_exists(&self, email: &str) -> Res<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.values().any(|u| u.email == email))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Res<Option<User>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_user_with_credentials(
        &self,
        email: &str,
    ) -> Res<Option<(User, AuthCredentials)>> {
        let inner = self.inner.read().unwrap();
        let Some(user) = inner.users.values().find(|u| u.email == email).cloned() else {
            return Ok(None);
        };
        let password_hash = inner
            .credentials
            .get(&user.id)
            .cloned()
            .ok_or_else(|| AppError::Internal("credentials missing for user".to_string()))?;
        let user_id = user.id;
        Ok(Some((
            user,
            AuthCredentials {
                user_id,
                password_hash,
            },
        )))
    }

    async fn insert_user(&self, data: NewUser, password_hash: String) -> Res<User> {
        let mut inner = self.inner.write().unwrap();
        if inner.users.values().any(|u| u.email == data.email) {
            return Err(AppError::Conflict(
                "User already exists with this email.".to_string(),
            ));
        }
        let ts = now();
        let user = User {
            id: Uuid::new_v4(),
            fullname: data.fullname,
            email: data.email,
            phone_number: data.phone_number,
            role: data.role.as_str().to_string(),
            bio: None,
            skills: Vec::new(),
            resume: None,
            resume_original_name: None,
            profile_photo: data.profile_photo,
            company_id: None,
            created_at: ts,
            updated_at: ts,
        };
        inner.credentials.insert(user.id, password_hash);
        inner.users.insert(user.id, user.clone());
        inner.stamp(user.id);
        Ok(user)
    }

    async fn update_user(&self, mut user: User) -> Res<User> {
        let mut inner = self.inner.write().unwrap();
        if !inner.users.contains_key(&user.id) {
            return Err(AppError::NotFound("User not found.".to_string()));
        }
        user.updated_at = now();
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl CompanyStore for MemStore {
    async fn company_name_exists(&self, name: &str) -> Res<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.companies.values().any(|c| c.name == name))
    }

    async fn insert_company(&self, data: NewCompany) -> Res<Company> {
        let mut inner = self.inner.write().unwrap();
        if inner.companies.values().any(|c| c.name == data.name) {
            return Err(AppError::Conflict(
                "You can't register the same company.".to_string(),
            ));
        }
        let ts = now();
        let company = Company {
            id: Uuid::new_v4(),
            name: data.name,
            description: None,
            website: None,
            location: None,
            logo: None,
            user_id: data.user_id,
            created_at: ts,
            updated_at: ts,
        };
        inner.companies.insert(company.id, company.clone());
        inner.stamp(company.id);
        Ok(company)
    }

    async fn find_companies_by_owner(&self, user_id: Uuid) -> Res<Vec<Company>> {
        let inner = self.inner.read().unwrap();
        let mut companies: Vec<Company> = inner
            .companies
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        companies.sort_by(|a, b| {
            inner
                .order_key(b.id, b.created_at)
                .cmp(&inner.order_key(a.id, a.created_at))
        });
        Ok(companies)
    }

    async fn find_company_by_id(&self, id: Uuid) -> Res<Option<Company>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.companies.get(&id).cloned())
    }

    async fn update_company(&self, mut company: Company) -> Res<Company> {
        let mut inner = self.inner.write().unwrap();
        if !inner.companies.contains_key(&company.id) {
            return Err(AppError::NotFound("Company not found.".to_string()));
        }
        company.updated_at = now();
        inner.companies.insert(company.id, company.clone());
        Ok(company)
    }
}

#[async_trait]
impl JobStore for MemStore {
    async fn insert_job(&self, data: NewJob) -> Res<Job> {
        let mut inner = self.inner.write().unwrap();
        let ts = now();
        let job = Job {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            requirements: data.requirements,
            salary: data.salary,
            location: data.location,
            job_type: data.job_type,
            experience_level: data.experience_level,
            position: data.position,
            company_id: data.company_id,
            created_by: data.created_by,
            created_at: ts,
            updated_at: ts,
        };
        inner.jobs.insert(job.id, job.clone());
        inner.stamp(job.id);
        Ok(job)
    }

    async fn search_jobs(&self, keyword: &str) -> Res<Vec<JobWithCompany>> {
        let inner = self.inner.read().unwrap();
        let needle = keyword.to_lowercase();
        let mut jobs: Vec<&Job> = inner
            .jobs
            .values()
            .filter(|j| {
                j.title.to_lowercase().contains(&needle)
                    || j.description.to_lowercase().contains(&needle)
            })
            .collect();
        jobs.sort_by(|a, b| {
            inner
                .order_key(b.id, b.created_at)
                .cmp(&inner.order_key(a.id, a.created_at))
        });
        Ok(jobs
            .into_iter()
            .filter_map(|j| {
                inner.companies.get(&j.company_id).map(|c| JobWithCompany {
                    job: j.clone(),
                    company: c.clone(),
                })
            })
            .collect())
    }

    async fn find_job_by_id(&self, id: Uuid) -> Res<Option<Job>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.jobs.get(&id).cloned())
    }

    async fn find_job_with_applications(&self, id: Uuid) -> Res<Option<JobWithApplications>> {
        let inner = self.inner.read().unwrap();
        let Some(job) = inner.jobs.get(&id).cloned() else {
            return Ok(None);
        };
        let mut applications: Vec<Application> = inner
            .applications
            .values()
            .filter(|a| a.job_id == id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| {
            inner
                .order_key(b.id, b.created_at)
                .cmp(&inner.order_key(a.id, a.created_at))
        });
        Ok(Some(JobWithApplications { job, applications }))
    }

    async fn find_jobs_by_creator(&self, user_id: Uuid) -> Res<Vec<JobWithCompany>> {
        let inner = self.inner.read().unwrap();
        let mut jobs: Vec<&Job> = inner
            .jobs
            .values()
            .filter(|j| j.created_by == user_id)
            .collect();
        jobs.sort_by(|a, b| {
            inner
                .order_key(b.id, b.created_at)
                .cmp(&inner.order_key(a.id, a.created_at))
        });
        Ok(jobs
            .into_iter()
            .filter_map(|j| {
                inner.companies.get(&j.company_id).map(|c| JobWithCompany {
                    job: j.clone(),
                    company: c.clone(),
                })
            })
            .collect())
    }

    async fn find_job_with_applicants(&self, id: Uuid) -> Res<Option<JobWithApplicants>> {
        let inner = self.inner.read().unwrap();
        let Some(job) = inner.jobs.get(&id).cloned() else {
            return Ok(None);
        };
        let mut applications: Vec<&Application> = inner
            .applications
            .values()
            .filter(|a| a.job_id == id)
            .collect();
        applications.sort_by(|a, b| {
            inner
                .order_key(b.id, b.created_at)
                .cmp(&inner.order_key(a.id, a.created_at))
        });
        let applications = applications
            .into_iter()
            .filter_map(|a| {
                inner
                    .users
                    .get(&a.applicant_id)
                    .map(|u| ApplicationWithApplicant {
                        application: a.clone(),
                        applicant: PublicUser::from(u.clone()),
                    })
            })
            .collect();
        Ok(Some(JobWithApplicants { job, applications }))
    }
}

#[async_trait]
impl ApplicationStore for MemStore {
    async fn find_application(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> Res<Option<Application>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .applications
            .values()
            .find(|a| a.job_id == job_id && a.applicant_id == applicant_id)
            .cloned())
    }

    async fn insert_application(&self, data: NewApplication) -> Res<Application> {
        let mut inner = self.inner.write().unwrap();
        if inner
            .applications
            .values()
            .any(|a| a.job_id == data.job_id && a.applicant_id == data.applicant_id)
        {
            return Err(AppError::Conflict(
                "You have already applied for this job.".to_string(),
            ));
        }
        let ts = now();
        let application = Application {
            id: Uuid::new_v4(),
            job_id: data.job_id,
            applicant_id: data.applicant_id,
            status: ApplicationStatus::Pending.as_str().to_string(),
            created_at: ts,
            updated_at: ts,
        };
        inner.applications.insert(application.id, application.clone());
        inner.stamp(application.id);
        Ok(application)
    }

    async fn find_applications_for_applicant(
        &self,
        applicant_id: Uuid,
    ) -> Res<Vec<ApplicationWithJob>> {
        let inner = self.inner.read().unwrap();
        let mut applications: Vec<&Application> = inner
            .applications
            .values()
            .filter(|a| a.applicant_id == applicant_id)
            .collect();
        applications.sort_by(|a, b| {
            inner
                .order_key(b.id, b.created_at)
                .cmp(&inner.order_key(a.id, a.created_at))
        });
        Ok(applications
            .into_iter()
            .filter_map(|a| {
                let job = inner.jobs.get(&a.job_id)?;
                let company = inner.companies.get(&job.company_id)?;
                Some(ApplicationWithJob {
                    application: a.clone(),
                    job: JobWithCompany {
                        job: job.clone(),
                        company: company.clone(),
                    },
                })
            })
            .collect())
    }

    async fn find_application_by_id(&self, id: Uuid) -> Res<Option<Application>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.applications.get(&id).cloned())
    }

    async fn set_application_status(&self, id: Uuid, status: ApplicationStatus) -> Res<()> {
        let mut inner = self.inner.write().unwrap();
        if let Some(application) = inner.applications.get_mut(&id) {
            application.status = status.as_str().to_string();
            application.updated_at = now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::misc::Role;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            fullname: "Test User".to_string(),
            email: email.to_string(),
            phone_number: "5551234".to_string(),
            role: Role::Student,
            profile_photo: String::new(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemStore::new();
        store
            .insert_user(new_user("a@example.com"), "hash".to_string())
            .await
            .unwrap();
        let err = store
            .insert_user(new_user("a@example.com"), "hash".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_application_is_a_conflict() {
        let store = MemStore::new();
        let recruiter = store
            .insert_user(new_user("r@example.com"), "hash".to_string())
            .await
            .unwrap();
        let company = store
            .insert_company(NewCompany {
                name: "Acme".to_string(),
                user_id: recruiter.id,
            })
            .await
            .unwrap();
        let job = store
            .insert_job(NewJob {
                title: "Engineer".to_string(),
                description: "Build".to_string(),
                requirements: vec!["Rust".to_string()],
                salary: 100_000,
                location: "Remote".to_string(),
                job_type: "Full-time".to_string(),
                experience_level: "2".to_string(),
                position: 1,
                company_id: company.id,
                created_by: recruiter.id,
            })
            .await
            .unwrap();
        let applicant = store
            .insert_user(new_user("s@example.com"), "hash".to_string())
            .await
            .unwrap();

        store
            .insert_application(NewApplication {
                job_id: job.id,
                applicant_id: applicant.id,
            })
            .await
            .unwrap();
        let err = store
            .insert_application(NewApplication {
                job_id: job.id,
                applicant_id: applicant.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let populated = store.find_job_with_applications(job.id).await.unwrap().unwrap();
        assert_eq!(populated.applications.len(), 1);
    }

    #[tokio::test]
    async fn search_is_newest_first() {
        let store = MemStore::new();
        let recruiter = store
            .insert_user(new_user("r@example.com"), "hash".to_string())
            .await
            .unwrap();
        let company = store
            .insert_company(NewCompany {
                name: "Acme".to_string(),
                user_id: recruiter.id,
            })
            .await
            .unwrap();
        for title in ["First", "Second", "Third"] {
            store
                .insert_job(NewJob {
                    title: title.to_string(),
                    description: "role".to_string(),
                    requirements: Vec::new(),
                    salary: 1,
                    location: "Remote".to_string(),
                    job_type: "Full-time".to_string(),
                    experience_level: "1".to_string(),
                    position: 1,
                    company_id: company.id,
                    created_by: recruiter.id,
                })
                .await
                .unwrap();
        }
        let jobs = store.search_jobs("").await.unwrap();
        let titles: Vec<&str> = jobs.iter().map(|j| j.job.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "Second", "First"]);
    }
}
