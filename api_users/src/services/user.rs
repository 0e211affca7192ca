use common::error::{AppError, Res};
use db::dtos::user::NewUser;
use db::models::user::User;
use db::store::Store;
use uuid::Uuid;

use crate::services::auth::hash_password;

/// Hashes the password and inserts the user with its credentials. The
/// existence check gives the ordinary duplicate its 400; the store's unique
/// email index answers the same way for a concurrent duplicate.
pub async fn create_user_with_credentials<S: Store + ?Sized>(
    store: &S,
    data: NewUser,
    password: &str,
) -> Res<User> {
    if store.email_exists(&data.email).await? {
        return Err(AppError::Conflict(
            "User already exists with this email.".to_string(),
        ));
    }
    let password_hash = hash_password(password)?;
    store.insert_user(data, password_hash).await
}

/// The subset of profile fields a user may change. `None` means "leave
/// untouched"; the route maps empty strings to `None` as well.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    /// Hosted resume URL plus the original filename.
    pub resume: Option<(String, String)>,
}

/// Applies the supplied changes to the caller's own record.
pub async fn update_profile<S: Store + ?Sized>(
    store: &S,
    user_id: Uuid,
    changes: ProfileChanges,
) -> Res<User> {
    let Some(mut user) = store.find_user_by_id(user_id).await? else {
        return Err(AppError::NotFound("User not found.".to_string()));
    };

    if let Some(fullname) = changes.fullname {
        user.fullname = fullname;
    }
    if let Some(email) = changes.email {
        user.email = email;
    }
    if let Some(phone_number) = changes.phone_number {
        user.phone_number = phone_number;
    }
    if let Some(bio) = changes.bio {
        user.bio = Some(bio);
    }
    if let Some(skills) = changes.skills {
        user.skills = split_skills(&skills);
    }
    if let Some((url, original_name)) = changes.resume {
        user.resume = Some(url);
        user.resume_original_name = Some(original_name);
    }

    store.update_user(user).await
}

/// Splits the comma-separated skills field into a de-duplicated list,
/// keeping first-seen order.
fn split_skills(raw: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in raw.split(',') {
        let skill = skill.trim();
        if !skill.is_empty() && !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::misc::Role;
    use db::mem::MemStore;

    fn registration(email: &str) -> NewUser {
        NewUser {
            fullname: "Jordan Baker".to_string(),
            email: email.to_string(),
            phone_number: "5550001".to_string(),
            role: Role::Student,
            profile_photo: String::new(),
        }
    }

    #[test]
    fn skills_are_split_trimmed_and_deduplicated() {
        assert_eq!(
            split_skills("Rust, SQL,Rust , ,Go"),
            vec!["Rust".to_string(), "SQL".to_string(), "Go".to_string()]
        );
        assert!(split_skills("").is_empty());
    }

    #[tokio::test]
    async fn second_registration_with_same_email_fails() {
        let store = MemStore::new();
        create_user_with_credentials(&store, registration("dup@example.com"), "pw")
            .await
            .unwrap();
        let err = create_user_with_credentials(&store, registration("dup@example.com"), "pw")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already exists with this email.");
    }

    #[tokio::test]
    async fn partial_update_leaves_absent_fields_untouched() {
        let store = MemStore::new();
        let user = create_user_with_credentials(&store, registration("jb@example.com"), "pw")
            .await
            .unwrap();

        let updated = update_profile(
            &store,
            user.id,
            ProfileChanges {
                bio: Some("Systems engineer".to_string()),
                skills: Some("Rust,Postgres".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.fullname, "Jordan Baker");
        assert_eq!(updated.email, "jb@example.com");
        assert_eq!(updated.bio.as_deref(), Some("Systems engineer"));
        assert_eq!(updated.skills, vec!["Rust", "Postgres"]);
    }

    #[tokio::test]
    async fn updating_an_unknown_user_is_not_found() {
        let store = MemStore::new();
        let err = update_profile(&store, Uuid::new_v4(), ProfileChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn resume_upload_sets_url_and_original_name() {
        let store = MemStore::new();
        let user = create_user_with_credentials(&store, registration("jb@example.com"), "pw")
            .await
            .unwrap();

        let updated = update_profile(
            &store,
            user.id,
            ProfileChanges {
                resume: Some((
                    "https://cdn.example.com/files/abc.pdf".to_string(),
                    "JordanBakerResume.pdf".to_string(),
                )),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(
            updated.resume.as_deref(),
            Some("https://cdn.example.com/files/abc.pdf")
        );
        assert_eq!(
            updated.resume_original_name.as_deref(),
            Some("JordanBakerResume.pdf")
        );
    }
}
