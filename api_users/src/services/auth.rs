use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier},
};
use common::{
    error::{AppError, Res},
    misc::Role,
};
use db::models::user::User;
use db::store::Store;

/// Hashes a registration password with a fresh salt.
pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

/// Authenticates an existing user.
///
/// Unknown email and wrong password answer with the same message so the
/// endpoint does not enumerate accounts; a role mismatch is reported
/// separately, matching the wire contract.
pub async fn authenticate_user<S: Store + ?Sized>(
    store: &S,
    email: &str,
    password: &str,
    role: Role,
) -> Res<User> {
    let Some((user, credentials)) = store.find_user_with_credentials(email).await? else {
        return Err(AppError::BadRequest(
            "Incorrect email or password.".to_string(),
        ));
    };

    let parsed_hash = PasswordHash::new(&credentials.password_hash)
        .map_err(|e| AppError::Internal(format!("stored password hash invalid: {}", e)))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    if !is_valid {
        return Err(AppError::BadRequest(
            "Incorrect email or password.".to_string(),
        ));
    }

    if user.role != role.as_str() {
        return Err(AppError::BadRequest(
            "Account does not exist with the specified role.".to_string(),
        ));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::user::create_user_with_credentials;
    use db::dtos::user::NewUser;
    use db::mem::MemStore;

    fn registration(email: &str, role: Role) -> NewUser {
        NewUser {
            fullname: "Jordan Baker".to_string(),
            email: email.to_string(),
            phone_number: "5550001".to_string(),
            role,
            profile_photo: String::new(),
        }
    }

    #[tokio::test]
    async fn login_succeeds_with_matching_role() {
        let store = MemStore::new();
        create_user_with_credentials(&store, registration("jb@example.com", Role::Student), "hunter2")
            .await
            .unwrap();

        let user = authenticate_user(&store, "jb@example.com", "hunter2", Role::Student)
            .await
            .unwrap();
        assert_eq!(user.email, "jb@example.com");
    }

    #[tokio::test]
    async fn login_fails_with_wrong_role() {
        let store = MemStore::new();
        create_user_with_credentials(&store, registration("jb@example.com", Role::Student), "hunter2")
            .await
            .unwrap();

        let err = authenticate_user(&store, "jb@example.com", "hunter2", Role::Recruiter)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(
            err.to_string(),
            "Account does not exist with the specified role."
        );
    }

    #[tokio::test]
    async fn login_fails_with_wrong_password_or_unknown_email() {
        let store = MemStore::new();
        create_user_with_credentials(&store, registration("jb@example.com", Role::Student), "hunter2")
            .await
            .unwrap();

        let wrong_password = authenticate_user(&store, "jb@example.com", "hunter3", Role::Student)
            .await
            .unwrap_err();
        let unknown_email = authenticate_user(&store, "nobody@example.com", "hunter2", Role::Student)
            .await
            .unwrap_err();
        // same generic message for both failure modes
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn public_projection_never_contains_a_password() {
        let store = MemStore::new();
        let user =
            create_user_with_credentials(&store, registration("jb@example.com", Role::Student), "hunter2")
                .await
                .unwrap();

        let json =
            serde_json::to_string(&db::dtos::user::PublicUser::from(user)).unwrap();
        assert!(!json.to_lowercase().contains("password"));
        assert!(!json.contains("hunter2"));
    }
}
