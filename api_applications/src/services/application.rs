use common::error::{AppError, Res};
use common::misc::ApplicationStatus;
use db::dtos::application::{ApplicationWithJob, JobWithApplicants, NewApplication};
use db::models::application::Application;
use db::store::Store;
use uuid::Uuid;

/// Applies the caller to a job.
///
/// The existence check makes the operation answer a friendly conflict on a
/// repeat apply; the store's unique `(job, applicant)` constraint closes
/// the race two concurrent applies would otherwise win together.
pub async fn apply<S: Store + ?Sized>(
    store: &S,
    job_id: Uuid,
    applicant_id: Uuid,
) -> Res<Application> {
    if store.find_application(job_id, applicant_id).await?.is_some() {
        return Err(AppError::Conflict(
            "You have already applied for this job.".to_string(),
        ));
    }

    if store.find_job_by_id(job_id).await?.is_none() {
        return Err(AppError::NotFound("Job not found.".to_string()));
    }

    store
        .insert_application(NewApplication {
            job_id,
            applicant_id,
        })
        .await
}

/// The caller's applications, newest first, each with its job and the
/// job's company resolved. Empty answers 404.
pub async fn get_applied_jobs<S: Store + ?Sized>(
    store: &S,
    applicant_id: Uuid,
) -> Res<Vec<ApplicationWithJob>> {
    let applications = store.find_applications_for_applicant(applicant_id).await?;
    if applications.is_empty() {
        return Err(AppError::NotFound("No applications found.".to_string()));
    }
    Ok(applications)
}

/// The recruiter view of a job: every application with its applicant
/// resolved to the sanitized projection.
pub async fn get_applicants<S: Store + ?Sized>(store: &S, job_id: Uuid) -> Res<JobWithApplicants> {
    store
        .find_job_with_applicants(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found.".to_string()))
}

/// Persists a status change. Input is lowercased first and must name one
/// of the three states; anything else is rejected before the lookup.
pub async fn update_status<S: Store + ?Sized>(
    store: &S,
    application_id: Uuid,
    raw_status: &str,
) -> Res<()> {
    let status = ApplicationStatus::parse(raw_status)?;

    if store
        .find_application_by_id(application_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Application not found.".to_string()));
    }

    store.set_application_status(application_id, status).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::misc::Role;
    use db::dtos::company::NewCompany;
    use db::dtos::job::NewJob;
    use db::dtos::user::NewUser;
    use db::mem::MemStore;
    use db::store::{ApplicationStore, CompanyStore, JobStore, UserStore};

    struct Seed {
        job_id: Uuid,
        applicant_id: Uuid,
    }

    async fn seed(store: &MemStore) -> Seed {
        let recruiter = store
            .insert_user(
                NewUser {
                    fullname: "Rae Cruter".to_string(),
                    email: format!("{}@example.com", Uuid::new_v4()),
                    phone_number: "5550001".to_string(),
                    role: Role::Recruiter,
                    profile_photo: String::new(),
                },
                "hash".to_string(),
            )
            .await
            .unwrap();
        let company = store
            .insert_company(NewCompany {
                name: format!("Acme-{}", Uuid::new_v4()),
                user_id: recruiter.id,
            })
            .await
            .unwrap();
        let job = store
            .insert_job(NewJob {
                title: "Backend Engineer".to_string(),
                description: "Rust services".to_string(),
                requirements: vec!["Rust".to_string()],
                salary: 120_000,
                location: "Remote".to_string(),
                job_type: "Full-time".to_string(),
                experience_level: "3".to_string(),
                position: 1,
                company_id: company.id,
                created_by: recruiter.id,
            })
            .await
            .unwrap();
        let applicant = store
            .insert_user(
                NewUser {
                    fullname: "Sam Seeker".to_string(),
                    email: format!("{}@example.com", Uuid::new_v4()),
                    phone_number: "5550002".to_string(),
                    role: Role::Student,
                    profile_photo: String::new(),
                },
                "hash".to_string(),
            )
            .await
            .unwrap();
        Seed {
            job_id: job.id,
            applicant_id: applicant.id,
        }
    }

    #[tokio::test]
    async fn applying_twice_conflicts_and_leaves_one_application() {
        let store = MemStore::new();
        let s = seed(&store).await;

        apply(&store, s.job_id, s.applicant_id).await.unwrap();
        let err = apply(&store, s.job_id, s.applicant_id).await.unwrap_err();
        assert_eq!(err.to_string(), "You have already applied for this job.");

        let job = store
            .find_job_with_applications(s.job_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(job.applications.len(), 1);
    }

    #[tokio::test]
    async fn applying_to_a_missing_job_creates_nothing() {
        let store = MemStore::new();
        let s = seed(&store).await;

        let err = apply(&store, Uuid::new_v4(), s.applicant_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let listed = store
            .find_applications_for_applicant(s.applicant_id)
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn applied_listing_populates_job_and_company() {
        let store = MemStore::new();
        let s = seed(&store).await;
        apply(&store, s.job_id, s.applicant_id).await.unwrap();

        let listed = get_applied_jobs(&store, s.applicant_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].job.job.id, s.job_id);
        assert_eq!(listed[0].job.company.id, listed[0].job.job.company_id);

        let err = get_applied_jobs(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn applicants_listing_resolves_the_applicant() {
        let store = MemStore::new();
        let s = seed(&store).await;
        apply(&store, s.job_id, s.applicant_id).await.unwrap();

        let job = get_applicants(&store, s.job_id).await.unwrap();
        assert_eq!(job.applications.len(), 1);
        assert_eq!(job.applications[0].applicant.id, s.applicant_id);
        assert_eq!(job.applications[0].application.status, "pending");
    }

    #[tokio::test]
    async fn status_updates_are_lowercased_and_validated() {
        let store = MemStore::new();
        let s = seed(&store).await;
        let application = apply(&store, s.job_id, s.applicant_id).await.unwrap();

        update_status(&store, application.id, "Accepted").await.unwrap();
        let stored = store
            .find_application_by_id(application.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, "accepted");

        let err = update_status(&store, application.id, "withdrawn")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn status_update_on_unknown_application_is_not_found() {
        let store = MemStore::new();
        let err = update_status(&store, Uuid::new_v4(), "accepted")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Application not found.");
    }
}
