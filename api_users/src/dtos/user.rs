use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use db::dtos::user::PublicUser;
use serde::{Deserialize, Serialize};

/// Login body. Fields are optional so that missing ones produce the
/// envelope's 400 instead of a deserializer error.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, MultipartForm)]
pub struct RegisterForm {
    pub fullname: Option<Text<String>>,
    pub email: Option<Text<String>>,
    #[multipart(rename = "phoneNumber")]
    pub phone_number: Option<Text<String>>,
    pub password: Option<Text<String>>,
    pub role: Option<Text<String>>,
    pub file: Option<Bytes>,
}

#[derive(Debug, MultipartForm)]
pub struct UpdateProfileForm {
    pub fullname: Option<Text<String>>,
    pub email: Option<Text<String>>,
    #[multipart(rename = "phoneNumber")]
    pub phone_number: Option<Text<String>>,
    pub bio: Option<Text<String>>,
    /// Comma-separated list, split server-side.
    pub skills: Option<Text<String>>,
    pub file: Option<Bytes>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: PublicUser,
    pub success: bool,
}
