//! Credential store operations: login and staff account management.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use bakehouse_core::{StaffRole, UserId};

use crate::db::{RepositoryError, UserRepository};
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during credential operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong username or wrong password; deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username is already taken.
    #[error("username already exists")]
    DuplicateUsername,

    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Credential service over the staff user repository.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new credential service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Authenticate a staff member by username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` whether the username is
    /// unknown or the password does not match; the two cases are never
    /// distinguished.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Username and password are required".to_owned(),
            ));
        }

        let (user, password_hash) = self
            .users
            .get_with_password_hash(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Create a new staff account with a freshly salted password hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for missing fields or a too-short
    /// password, `AuthError::DuplicateUsername` if the username is taken.
    /// On any failure nothing is written.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: StaffRole,
    ) -> Result<User, AuthError> {
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_owned()));
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(username, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateUsername,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Delete a staff account. Returns `true` if an account was removed;
    /// deleting an absent id succeeds with `false`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn delete_user(&self, id: UserId) -> Result<bool, AuthError> {
        let deleted = self.users.delete(id).await?;
        Ok(deleted)
    }

    /// List all staff accounts (password hashes never leave the
    /// repository).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let users = self.users.list().await?;
        Ok(users)
    }
}

/// Hash a password using Argon2id with a random per-user salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored PHC hash (constant-time).
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_salts_per_password() {
        let first = hash_password("buttercream").expect("hash");
        let second = hash_password("buttercream").expect("hash");

        // Same password, different salt, different hash.
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
    }

    #[test]
    fn verify_accepts_the_right_password() {
        let hash = hash_password("buttercream").expect("hash");
        assert!(verify_password("buttercream", &hash).is_ok());
    }

    #[test]
    fn verify_rejects_the_wrong_password() {
        let hash = hash_password("buttercream").expect("hash");
        let err = verify_password("ganache", &hash).expect_err("must fail");
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn verify_rejects_garbage_hashes_as_invalid_credentials() {
        let err = verify_password("anything", "not-a-phc-hash").expect_err("must fail");
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
