use async_trait::async_trait;
use common::{error::Res, misc::ApplicationStatus};
use uuid::Uuid;

use crate::dtos::application::{ApplicationWithJob, JobWithApplicants, NewApplication};
use crate::dtos::company::NewCompany;
use crate::dtos::job::{JobWithApplications, JobWithCompany, NewJob};
use crate::dtos::user::NewUser;
use crate::models::application::Application;
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::user::{AuthCredentials, User};

/// Repository seam over the persistence engine. Handlers and services only
/// see these traits; `pg::PgStore` is the production engine and
/// `mem::MemStore` backs the test suites.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn email_exists(&self, email: &str) -> Res<bool>;
    async fn find_user_by_id(&self, id: Uuid) -> Res<Option<User>>;
    /// The only path that exposes the password hash, used by login.
    async fn find_user_with_credentials(&self, email: &str)
    -> Res<Option<(User, AuthCredentials)>>;
    /// Inserts the user and its credentials atomically. A concurrent insert
    /// of the same email surfaces as a Conflict.
    async fn insert_user(&self, data: NewUser, password_hash: String) -> Res<User>;
    /// Full-row update; partial-merge logic lives in the service layer.
    async fn update_user(&self, user: User) -> Res<User>;
}

#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn company_name_exists(&self, name: &str) -> Res<bool>;
    async fn insert_company(&self, data: NewCompany) -> Res<Company>;
    async fn find_companies_by_owner(&self, user_id: Uuid) -> Res<Vec<Company>>;
    async fn find_company_by_id(&self, id: Uuid) -> Res<Option<Company>>;
    async fn update_company(&self, company: Company) -> Res<Company>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert_job(&self, data: NewJob) -> Res<Job>;
    /// Case-insensitive substring match on title OR description, company
    /// populated, newest first. An empty keyword matches every job.
    async fn search_jobs(&self, keyword: &str) -> Res<Vec<JobWithCompany>>;
    async fn find_job_by_id(&self, id: Uuid) -> Res<Option<Job>>;
    async fn find_job_with_applications(&self, id: Uuid) -> Res<Option<JobWithApplications>>;
    async fn find_jobs_by_creator(&self, user_id: Uuid) -> Res<Vec<JobWithCompany>>;
    async fn find_job_with_applicants(&self, id: Uuid) -> Res<Option<JobWithApplicants>>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn find_application(&self, job_id: Uuid, applicant_id: Uuid)
    -> Res<Option<Application>>;
    /// Creates the application with status `pending`. The engine must hold a
    /// unique constraint on `(job_id, applicant_id)` and report a duplicate
    /// as a Conflict, so concurrent duplicate applies cannot both land.
    async fn insert_application(&self, data: NewApplication) -> Res<Application>;
    async fn find_applications_for_applicant(
        &self,
        applicant_id: Uuid,
    ) -> Res<Vec<ApplicationWithJob>>;
    async fn find_application_by_id(&self, id: Uuid) -> Res<Option<Application>>;
    async fn set_application_status(&self, id: Uuid, status: ApplicationStatus) -> Res<()>;
}

pub trait Store: UserStore + CompanyStore + JobStore + ApplicationStore {}
impl<T: UserStore + CompanyStore + JobStore + ApplicationStore + ?Sized> Store for T {}
