use serde::Serialize;
use uuid::Uuid;

use crate::dtos::job::JobWithCompany;
use crate::dtos::user::PublicUser;
use crate::models::{application::Application, job::Job};

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub applicant_id: Uuid,
}

/// An application with its job (and the job's company) resolved; the shape
/// of the applicant-facing listing.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: Application,
    pub job: JobWithCompany,
}

/// An application with its applicant resolved to the sanitized projection.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithApplicant {
    #[serde(flatten)]
    pub application: Application,
    pub applicant: PublicUser,
}

/// The recruiter-facing view of a job: the job plus every application,
/// each with its applicant populated.
#[derive(Debug, Clone, Serialize)]
pub struct JobWithApplicants {
    #[serde(flatten)]
    pub job: Job,
    pub applications: Vec<ApplicationWithApplicant>,
}
