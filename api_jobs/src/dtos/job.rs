use db::dtos::job::{JobWithApplications, JobWithCompany};
use db::models::job::Job;
use serde::{Deserialize, Serialize};

/// Posting body. `salary` and `position` arrive as either strings or
/// numbers depending on the client; they are coerced server-side.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Comma-separated; split into an ordered list.
    pub requirements: Option<String>,
    pub salary: Option<serde_json::Value>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub position: Option<serde_json::Value>,
    pub company_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobQuery {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub message: String,
    pub job: Job,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobWithCompany>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    pub job: JobWithApplications,
    pub success: bool,
}
