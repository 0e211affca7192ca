use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One applicant's application to one job. At most one row may exist per
/// `(job_id, applicant_id)` pair; the store enforces this with a unique
/// compound index in addition to the service-level existence check.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    /// "pending" | "accepted" | "rejected"; parsed through
    /// `common::misc::ApplicationStatus` at the update boundary.
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
