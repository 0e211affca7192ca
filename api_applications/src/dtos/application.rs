use db::dtos::application::{ApplicationWithJob, JobWithApplicants};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationWithJob>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ApplicantsResponse {
    pub job: JobWithApplicants,
    pub success: bool,
}
