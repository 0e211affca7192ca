use serde::Serialize;
use uuid::Uuid;

use crate::models::{application::Application, company::Company, job::Job};

#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: i64,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    pub position: i32,
    pub company_id: Uuid,
    pub created_by: Uuid,
}

/// A job with its company reference resolved, as returned by search and
/// per-creator listings.
#[derive(Debug, Clone, Serialize)]
pub struct JobWithCompany {
    #[serde(flatten)]
    pub job: Job,
    pub company: Company,
}

/// A job with its application references resolved to full records.
#[derive(Debug, Clone, Serialize)]
pub struct JobWithApplications {
    #[serde(flatten)]
    pub job: Job,
    pub applications: Vec<Application>,
}
