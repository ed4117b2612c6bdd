use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::crypto::{hash_password_blocking, verify_password_blocking};
use crate::db::models::User;
use crate::error::AppError;

pub struct UserRepository;

impl UserRepository {
    /// Hash the password and insert a new user, marked online.
    pub async fn create(
        pool: &Pool<Sqlite>,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if Self::get_by_username(pool, username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        let password_hash = hash_password_blocking(password.to_string()).await?;
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
INSERT INTO users (username, password_hash, online, last_seen, created_at)
VALUES (?, ?, 1, ?, ?)
RETURNING *
            "#,
        )
        .bind(username)
        .bind(&password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent registration
            let taken = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if taken {
                AppError::DuplicateUsername
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(user)
    }

    /// Check credentials and mark the user online. Unknown users and wrong
    /// passwords fail identically.
    pub async fn authenticate(
        pool: &Pool<Sqlite>,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let user = Self::get_by_username(pool, username)
            .await?
            .ok_or(AppError::AuthFailure)?;

        let valid = verify_password_blocking(password.to_string(), user.password_hash.clone()).await?;
        if !valid {
            return Err(AppError::AuthFailure);
        }

        Self::set_online(pool, user.id, true).await?;

        Self::get_by_id(pool, user.id)
            .await?
            .ok_or(AppError::AuthFailure)
    }

    pub async fn set_offline(pool: &Pool<Sqlite>, id: i64) -> Result<(), AppError> {
        Self::set_online(pool, id, false).await
    }

    async fn set_online(pool: &Pool<Sqlite>, id: i64, online: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET online = ?, last_seen = ? WHERE id = ?")
            .bind(online)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn get_by_username(
        pool: &Pool<Sqlite>,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = ?"
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_id(
        pool: &Pool<Sqlite>,
        id: i64,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
