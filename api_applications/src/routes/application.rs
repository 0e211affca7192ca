use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::error::{AppError, Res};
use common::http::{Message, Success};
use common::jwt::JwtClaims;
use db::store::Store;
use uuid::Uuid;

use crate::dtos::application::{ApplicantsResponse, ApplicationListResponse, UpdateStatusRequest};
use crate::services;

/// Applies the caller to the job in the path.
///
/// # Output
/// - Success: 201 Created, confirmation message only
/// - Error: 400 Bad Request on a repeat apply, 404 Not Found for an
///   unknown job
#[get("/apply/{id}")]
pub async fn get_apply(
    path: web::Path<Uuid>,
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    services::application::apply(&***store, path.into_inner(), claims.user_id).await?;
    Success::created(Message::new("Job applied successfully."))
}

/// The caller's applications, newest first, jobs and companies populated.
#[get("/get")]
pub async fn get_applied_jobs(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let applications =
        services::application::get_applied_jobs(&***store, claims.user_id).await?;
    Success::ok(ApplicationListResponse {
        applications,
        success: true,
    })
}

/// Recruiter view: the job with all applications and their applicants.
#[get("/{id}/applicants")]
pub async fn get_applicants(
    path: web::Path<Uuid>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let job = services::application::get_applicants(&***store, path.into_inner()).await?;
    Success::ok(ApplicantsResponse { job, success: true })
}

/// Updates an application's status.
///
/// # Input
/// - JSON body: `status` — one of `pending`, `accepted`, `rejected`, any
///   casing
///
/// # Output
/// - Success: 200 OK, confirmation message only
/// - Error: 400 Bad Request for a missing or out-of-range status, 404 Not
///   Found for an unknown application
#[post("/status/{id}/update")]
pub async fn post_update_status(
    path: web::Path<Uuid>,
    req: web::Json<UpdateStatusRequest>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let Some(status) = req.into_inner().status.filter(|s| !s.is_empty()) else {
        return Err(AppError::BadRequest("Status is required".to_string()));
    };

    services::application::update_status(&***store, path.into_inner(), &status).await?;
    Success::ok(Message::new("Status updated successfully."))
}
