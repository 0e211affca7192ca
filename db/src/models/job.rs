use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Ordered list, split from the comma-separated posting form.
    pub requirements: Vec<String>,
    pub salary: i64,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    /// Number of open positions.
    pub position: i32,
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
