//! Authentication service.
//!
//! Password login for admins. Hashes are Argon2id in PHC string format.

mod error;

use std::sync::LazyLock;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use nursery_core::Email;

use crate::db::{AdminStore, RepositoryError};
use crate::models::AdminUser;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash checked on a login miss so unknown emails cost the same Argon2 work
/// as known ones.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("nursery-unknown-admin").ok());

/// Authentication service.
///
/// Handles admin creation and password login.
pub struct AuthService<'a> {
    admins: &'a dyn AdminStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(admins: &'a dyn AdminStore) -> Self {
        Self { admins }
    }

    /// Create a new admin with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::AdminAlreadyExists` if the email is already registered.
    pub async fn create_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AdminUser, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        self.admins
            .create(&email, name.trim(), &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AdminAlreadyExists,
                other => AuthError::Repository(other),
            })
    }

    /// Login with email and password.
    ///
    /// Unknown emails and wrong passwords produce the same error, and both
    /// run one Argon2 verification.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AdminUser, AuthError> {
        let found = match Email::parse(email) {
            Ok(email) => self.admins.get_password_hash(&email).await?,
            Err(_) => None,
        };

        let Some((admin, password_hash)) = found else {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = verify_password(password, hash);
            }
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &password_hash)?;

        Ok(admin)
    }
}

/// Validate password meets requirements.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryAdminStore;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_dummy_hash_is_a_real_argon2_hash() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(matches!(
            verify_password("greenhouse", hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_password_length() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[tokio::test]
    async fn test_create_then_login() {
        let store = MemoryAdminStore::new();
        let auth = AuthService::new(&store);

        let created = auth
            .create_admin("Admin@Nursery.Test", " Head Gardener ", "greenhouse")
            .await
            .unwrap();
        assert_eq!(created.email.as_str(), "admin@nursery.test");
        assert_eq!(created.name, "Head Gardener");

        let admin = auth
            .login_with_password("admin@nursery.test", "greenhouse")
            .await
            .unwrap();
        assert_eq!(admin.id, created.id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = MemoryAdminStore::new();
        let auth = AuthService::new(&store);
        auth.create_admin("admin@nursery.test", "Admin", "greenhouse")
            .await
            .unwrap();

        for (email, password) in [
            ("admin@nursery.test", "wrong password"),
            ("nobody@nursery.test", "greenhouse"),
            ("not-an-email", "greenhouse"),
        ] {
            let err = auth.login_with_password(email, password).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn test_duplicate_admin_rejected() {
        let store = MemoryAdminStore::new();
        let auth = AuthService::new(&store);
        auth.create_admin("admin@nursery.test", "Admin", "greenhouse")
            .await
            .unwrap();

        let err = auth
            .create_admin("ADMIN@nursery.test", "Again", "greenhouse")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AdminAlreadyExists));
    }
}
