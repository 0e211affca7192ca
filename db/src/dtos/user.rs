use common::misc::Role;
use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::models::user::User;

/// Fields collected at registration. The password hash travels separately so
/// it can never end up in a serializable struct.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub profile_photo: String,
}

/// Nested profile block of the wire-level user projection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub resume: Option<String>,
    pub resume_original_name: Option<String>,
    pub profile_photo: String,
    pub company: Option<Uuid>,
}

/// The sanitized user projection returned to clients. Built from a `User`
/// row, which never carries the password hash to begin with.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub profile: Profile,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role,
            profile: Profile {
                bio: user.bio,
                skills: user.skills,
                resume: user.resume,
                resume_original_name: user.resume_original_name,
                profile_photo: user.profile_photo,
                company: user.company_id,
            },
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
