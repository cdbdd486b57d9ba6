//! Staff user repository.
//!
//! The password hash is only ever handed out via
//! [`UserRepository::get_with_password_hash`] for login verification; the
//! listing queries never select it.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bakehouse_core::{StaffRole, UserId};

use super::RepositoryError;
use crate::models::User;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let role = self.role.parse::<StaffRole>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;
        Ok(User {
            id: UserId::new(self.id),
            username: self.username,
            role,
            created_at: self.created_at,
        })
    }
}

/// Repository for staff user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all staff accounts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, role, created_at FROM staff_users ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Look up a user by username, returning the stored password hash
    /// alongside the account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: i64,
            username: String,
            password_hash: String,
            role: String,
            created_at: DateTime<Utc>,
        }

        let row = sqlx::query_as::<_, Row>(
            "SELECT id, username, password_hash, role, created_at \
             FROM staff_users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => {
                let hash = r.password_hash;
                let user = UserRow {
                    id: r.id,
                    username: r.username,
                    role: r.role,
                    created_at: r.created_at,
                }
                .into_user()?;
                Ok(Some((user, hash)))
            }
            None => Ok(None),
        }
    }

    /// Insert a new staff account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: StaffRole,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO staff_users (username, password_hash, role) \
             VALUES ($1, $2, $3) \
             RETURNING id, username, role, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role.to_string())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                RepositoryError::Conflict(format!("username already exists: {username}"))
            } else {
                RepositoryError::Database(e)
            }
        })?;

        row.into_user()
    }

    /// Delete a staff account by id.
    ///
    /// Returns `true` if a row was deleted. Deleting an absent id is not an
    /// error; orders and products are not owned by users, so there is no
    /// referential cleanup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM staff_users WHERE id = $1")
            .bind(id.get())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
