use std::sync::Arc;

use actix_multipart::form::{MultipartForm, text::Text};
use actix_web::{HttpResponse, Responder, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::{Message, Success};
use common::jwt::{self, JwtClaims};
use common::misc::Role;
use db::dtos::user::{NewUser, PublicUser};
use db::store::Store;
use uploads::Uploader;

use crate::dtos::user::{AuthResponse, LoginRequest, RegisterForm, UpdateProfileForm};
use crate::services;
use crate::services::user::ProfileChanges;

/// Empty form fields count as absent, like the original frontend sends them.
fn text(value: Option<Text<String>>) -> Option<String> {
    value.map(Text::into_inner).filter(|s| !s.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Registers a new user with email and password authentication.
///
/// # Input
/// - multipart form: `fullname`, `email`, `phoneNumber`, `password`, `role`,
///   optional `file` (profile photo, uploaded to object storage)
///
/// # Output
/// - Success: 201 Created with the sanitized user projection
/// - Error: 400 Bad Request if a field is missing or the email is taken
///
/// Registration does not log the user in; the client follows up with
/// `/login` to obtain the identity cookie.
#[post("/register")]
pub async fn post_register(
    MultipartForm(form): MultipartForm<RegisterForm>,
    store: web::Data<Arc<dyn Store>>,
    uploader: web::Data<Arc<Uploader>>,
) -> Res<impl Responder> {
    let (Some(fullname), Some(email), Some(phone_number), Some(password), Some(role)) = (
        text(form.fullname),
        text(form.email),
        text(form.phone_number),
        text(form.password),
        text(form.role),
    ) else {
        return Err(AppError::BadRequest("All fields are required.".to_string()));
    };
    let role = Role::parse(&role)?;

    let mut profile_photo = String::new();
    if let Some(file) = &form.file {
        profile_photo = uploader.upload_form_file(file).await?;
    }

    let user = services::user::create_user_with_credentials(
        &***store,
        NewUser {
            fullname,
            email,
            phone_number,
            role,
            profile_photo,
        },
        &password,
    )
    .await?;

    Success::created(AuthResponse {
        message: "Account created successfully.".to_string(),
        user: PublicUser::from(user),
        success: true,
    })
}

/// Authenticates a user with email, password and role.
///
/// # Input
/// - JSON body: `email`, `password`, `role`
///
/// # Output
/// - Success: 200 OK with the user projection; the signed identity token is
///   set as the HTTP-only `token` cookie
/// - Error: 400 Bad Request for missing fields, credential mismatch, or a
///   role that does not match the account
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    store: web::Data<Arc<dyn Store>>,
) -> Res<impl Responder> {
    let login = login_data.into_inner();
    let (Some(email), Some(password), Some(role)) = (
        non_empty(login.email),
        non_empty(login.password),
        non_empty(login.role),
    ) else {
        return Err(AppError::BadRequest("All fields are required.".to_string()));
    };
    let role = Role::parse(&role)?;

    let user = services::auth::authenticate_user(&***store, &email, &password, role).await?;
    let token = jwt::generate_jwt(user.id, &config.jwt_config)?;
    let cookie = jwt::auth_cookie(
        token,
        config.is_production(),
        config.jwt_config.expiration_hours,
    );

    let message = format!("Welcome back {}", user.fullname);
    Ok(HttpResponse::Ok().cookie(cookie).json(AuthResponse {
        message,
        user: PublicUser::from(user),
        success: true,
    }))
}

/// Clears the identity cookie. Succeeds whether or not a session existed.
#[post("/logout")]
pub async fn post_logout(config: web::Data<Arc<Config>>) -> Res<impl Responder> {
    let cookie = jwt::clear_auth_cookie(config.is_production());
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(Message::new("Logged out successfully.")))
}

/// Updates the caller's own profile.
///
/// # Input
/// - multipart form: any of `fullname`, `email`, `phoneNumber`, `bio`,
///   `skills` (comma-separated), optional `file` (resume)
///
/// Only supplied, non-empty fields are applied. An uploaded file becomes the
/// hosted resume URL; the original filename is kept for display.
///
/// # Output
/// - Success: 200 OK with the updated user projection
/// - Error: 401 without a valid identity, 404 if the account is gone
#[post("/update")]
pub async fn post_update_profile(
    MultipartForm(form): MultipartForm<UpdateProfileForm>,
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<dyn Store>>,
    uploader: web::Data<Arc<Uploader>>,
) -> Res<impl Responder> {
    let mut changes = ProfileChanges {
        fullname: text(form.fullname),
        email: text(form.email),
        phone_number: text(form.phone_number),
        bio: text(form.bio),
        skills: text(form.skills),
        resume: None,
    };

    if let Some(file) = &form.file {
        let original_name = file
            .file_name
            .clone()
            .unwrap_or_else(|| "resume".to_string());
        let url = uploader.upload_form_file(file).await?;
        changes.resume = Some((url, original_name));
    }

    let user = services::user::update_profile(&***store, claims.user_id, changes).await?;

    Success::ok(AuthResponse {
        message: "Profile updated successfully.".to_string(),
        user: PublicUser::from(user),
        success: true,
    })
}
