use std::sync::Arc;

use actix_multipart::form::{MultipartForm, text::Text};
use actix_web::{Responder, get, post, put, web};
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::JwtClaims;
use db::store::Store;
use uploads::Uploader;
use uuid::Uuid;

use crate::dtos::company::{
    CompanyListResponse, CompanyResponse, RegisterCompanyRequest, UpdateCompanyForm,
};
use crate::services;
use crate::services::company::CompanyChanges;

fn text(value: Option<Text<String>>) -> Option<String> {
    value.map(Text::into_inner).filter(|s| !s.is_empty())
}

/// Registers a new company owned by the calling recruiter.
///
/// # Input
/// - JSON body: `companyName`
///
/// # Output
/// - Success: 201 Created with the company
/// - Error: 400 Bad Request if the name is missing or already taken
#[post("/register")]
pub async fn post_register_company(
    req: web::Json<RegisterCompanyRequest>,
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let Some(name) = req.into_inner().company_name.filter(|n| !n.is_empty()) else {
        return Err(AppError::BadRequest("Company name is required.".to_string()));
    };

    let company = services::company::register_company(&***store, name, claims.user_id).await?;

    Success::created(CompanyResponse {
        message: Some("Company registered successfully.".to_string()),
        company,
        success: true,
    })
}

/// Lists the caller's companies. 404 when there are none.
#[get("/get")]
pub async fn get_companies(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let companies = services::company::get_companies_for_owner(&***store, claims.user_id).await?;
    Success::ok(CompanyListResponse {
        companies,
        success: true,
    })
}

/// Fetches one company by id. 404 when absent.
#[get("/get/{id}")]
pub async fn get_company(
    path: web::Path<Uuid>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let company = services::company::get_company_by_id(&***store, path.into_inner()).await?;
    Success::ok(CompanyResponse {
        message: None,
        company,
        success: true,
    })
}

/// Partially updates a company; an uploaded file becomes the logo URL.
///
/// # Input
/// - multipart form: any of `name`, `description`, `website`, `location`,
///   optional `file`
///
/// # Output
/// - Success: 200 OK with the updated company
/// - Error: 404 Not Found for an unknown id
#[put("/update/{id}")]
pub async fn put_update_company(
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<UpdateCompanyForm>,
    store: web::Data<Arc<dyn Store>>,
    uploader: web::Data<Arc<Uploader>>,
) -> Res<impl Responder> {
    let mut changes = CompanyChanges {
        name: text(form.name),
        description: text(form.description),
        website: text(form.website),
        location: text(form.location),
        logo: None,
    };

    if let Some(file) = &form.file {
        changes.logo = Some(uploader.upload_form_file(file).await?);
    }

    let company = services::company::update_company(&***store, path.into_inner(), changes).await?;

    Success::ok(CompanyResponse {
        message: Some("Company information updated.".to_string()),
        company,
        success: true,
    })
}
