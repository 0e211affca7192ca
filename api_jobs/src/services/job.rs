use common::error::{AppError, Res};
use db::dtos::job::{JobWithApplications, JobWithCompany, NewJob};
use db::models::job::Job;
use db::store::Store;
use uuid::Uuid;

use crate::dtos::job::PostJobRequest;

/// Accepts a JSON number or a numeric string, like the posting form sends.
fn coerce_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn split_requirements(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect()
}

/// Creates a job against an existing company. All nine posting fields are
/// required.
pub async fn post_job<S: Store + ?Sized>(
    store: &S,
    req: PostJobRequest,
    created_by: Uuid,
) -> Res<Job> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

    let (
        Some(title),
        Some(description),
        Some(requirements),
        Some(salary),
        Some(location),
        Some(job_type),
        Some(experience),
        Some(position),
        Some(company_id),
    ) = (
        non_empty(req.title),
        non_empty(req.description),
        non_empty(req.requirements),
        req.salary,
        non_empty(req.location),
        non_empty(req.job_type),
        non_empty(req.experience),
        req.position,
        non_empty(req.company_id),
    )
    else {
        return Err(AppError::BadRequest("Something is missing.".to_string()));
    };

    let salary = coerce_i64(&salary)
        .ok_or_else(|| AppError::BadRequest("Salary must be a number.".to_string()))?;
    let position = coerce_i64(&position)
        .ok_or_else(|| AppError::BadRequest("Position must be a number.".to_string()))?
        as i32;
    let company_id = Uuid::parse_str(&company_id)
        .map_err(|_| AppError::BadRequest("Invalid company id.".to_string()))?;

    // the store holds a foreign key on company_id; checking here turns the
    // constraint violation into a client error instead of a 500
    if store.find_company_by_id(company_id).await?.is_none() {
        return Err(AppError::BadRequest("Company not found.".to_string()));
    }

    store
        .insert_job(NewJob {
            title,
            description,
            requirements: split_requirements(&requirements),
            salary,
            location,
            job_type,
            experience_level: experience,
            position,
            company_id,
            created_by,
        })
        .await
}

/// Keyword search over title and description, newest first. An empty
/// keyword matches every job; an empty result answers 404 per the wire
/// contract.
pub async fn search_jobs<S: Store + ?Sized>(store: &S, keyword: &str) -> Res<Vec<JobWithCompany>> {
    let jobs = store.search_jobs(keyword).await?;
    if jobs.is_empty() {
        return Err(AppError::NotFound("Jobs not found.".to_string()));
    }
    Ok(jobs)
}

pub async fn get_job_by_id<S: Store + ?Sized>(store: &S, id: Uuid) -> Res<JobWithApplications> {
    store
        .find_job_with_applications(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found.".to_string()))
}

/// Jobs created by the caller, newest first. Empty answers 404.
pub async fn get_admin_jobs<S: Store + ?Sized>(
    store: &S,
    creator_id: Uuid,
) -> Res<Vec<JobWithCompany>> {
    let jobs = store.find_jobs_by_creator(creator_id).await?;
    if jobs.is_empty() {
        return Err(AppError::NotFound("Jobs not found.".to_string()));
    }
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::dtos::company::NewCompany;
    use db::mem::MemStore;
    use db::store::CompanyStore;

    async fn seed_company(store: &MemStore, owner: Uuid) -> Uuid {
        store
            .insert_company(NewCompany {
                name: format!("Acme-{}", Uuid::new_v4()),
                user_id: owner,
            })
            .await
            .unwrap()
            .id
    }

    fn posting(company_id: Uuid) -> PostJobRequest {
        PostJobRequest {
            title: Some("Backend Engineer".to_string()),
            description: Some("Own the REST backend".to_string()),
            requirements: Some("Rust, Postgres , actix".to_string()),
            salary: Some(serde_json::json!("120000")),
            location: Some("Remote".to_string()),
            job_type: Some("Full-time".to_string()),
            experience: Some("3".to_string()),
            position: Some(serde_json::json!(2)),
            company_id: Some(company_id.to_string()),
        }
    }

    #[tokio::test]
    async fn posting_with_a_missing_field_fails() {
        let store = MemStore::new();
        let owner = Uuid::new_v4();
        let company_id = seed_company(&store, owner).await;
        let mut req = posting(company_id);
        req.location = None;

        let err = post_job(&store, req, owner).await.unwrap_err();
        assert_eq!(err.to_string(), "Something is missing.");
    }

    #[tokio::test]
    async fn posting_splits_requirements_and_coerces_numbers() {
        let store = MemStore::new();
        let owner = Uuid::new_v4();
        let company_id = seed_company(&store, owner).await;

        let job = post_job(&store, posting(company_id), owner).await.unwrap();
        assert_eq!(job.requirements, vec!["Rust", "Postgres", "actix"]);
        assert_eq!(job.salary, 120_000);
        assert_eq!(job.position, 2);
        assert_eq!(job.created_by, owner);
    }

    #[tokio::test]
    async fn posting_against_an_unknown_company_fails() {
        let store = MemStore::new();
        let owner = Uuid::new_v4();
        let err = post_job(&store, posting(Uuid::new_v4()), owner)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Company not found.");
    }

    #[tokio::test]
    async fn search_filters_case_insensitively_and_sorts_newest_first() {
        let store = MemStore::new();
        let owner = Uuid::new_v4();
        let company_id = seed_company(&store, owner).await;

        for (title, description) in [
            ("Data Engineer", "pipelines"),
            ("Chef", "kitchen work"),
            ("Backend ENGINEER", "Rust services"),
        ] {
            let mut req = posting(company_id);
            req.title = Some(title.to_string());
            req.description = Some(description.to_string());
            post_job(&store, req, owner).await.unwrap();
        }

        let jobs = search_jobs(&store, "engineer").await.unwrap();
        let titles: Vec<&str> = jobs.iter().map(|j| j.job.title.as_str()).collect();
        assert_eq!(titles, vec!["Backend ENGINEER", "Data Engineer"]);
    }

    #[tokio::test]
    async fn search_with_no_matches_is_not_found() {
        let store = MemStore::new();
        let err = search_jobs(&store, "engineer").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn admin_listing_only_returns_the_callers_jobs() {
        let store = MemStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let company_id = seed_company(&store, alice).await;

        post_job(&store, posting(company_id), alice).await.unwrap();
        post_job(&store, posting(company_id), bob).await.unwrap();

        let jobs = get_admin_jobs(&store, alice).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].job.created_by, alice);

        let err = get_admin_jobs(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_job_id_is_not_found() {
        let store = MemStore::new();
        let err = get_job_by_id(&store, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "Job not found.");
    }
}
