use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::error::Res;
use common::http::Success;
use common::jwt::JwtClaims;
use db::store::Store;
use uuid::Uuid;

use crate::dtos::job::{JobDetailResponse, JobListResponse, JobQuery, JobResponse, PostJobRequest};
use crate::services;

/// Posts a new job for the calling recruiter.
///
/// # Input
/// - JSON body: `title`, `description`, `requirements` (comma-separated),
///   `salary`, `location`, `jobType`, `experience`, `position`, `companyId`
///
/// # Output
/// - Success: 201 Created with the job
/// - Error: 400 Bad Request when any field is missing or malformed
#[post("/post")]
pub async fn post_job(
    req: web::Json<PostJobRequest>,
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let job = services::job::post_job(&***store, req.into_inner(), claims.user_id).await?;
    Success::created(JobResponse {
        message: "New job created successfully.".to_string(),
        job,
        success: true,
    })
}

/// Keyword search over all jobs, companies populated, newest first.
/// `?keyword=` is optional; absent matches everything. 404 when nothing
/// matches.
#[get("/get")]
pub async fn get_jobs(
    query: web::Query<JobQuery>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let keyword = query.into_inner().keyword.unwrap_or_default();
    let jobs = services::job::search_jobs(&***store, &keyword).await?;
    Success::ok(JobListResponse {
        jobs,
        success: true,
    })
}

/// One job by id with its applications resolved. 404 when absent.
#[get("/get/{id}")]
pub async fn get_job_by_id(
    path: web::Path<Uuid>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let job = services::job::get_job_by_id(&***store, path.into_inner()).await?;
    Success::ok(JobDetailResponse {
        job,
        success: true,
    })
}

/// Jobs created by the caller, companies populated, newest first.
#[get("/getadminjobs")]
pub async fn get_admin_jobs(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let jobs = services::job::get_admin_jobs(&***store, claims.user_id).await?;
    Success::ok(JobListResponse {
        jobs,
        success: true,
    })
}
