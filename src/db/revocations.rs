use sqlx::{Pool, Sqlite};

use crate::db::models::RevokedToken;
use crate::error::AppError;

/// Tokens invalidated by logout before their natural expiry.
pub struct RevocationRepository;

impl RevocationRepository {
    pub async fn revoke(
        pool: &Pool<Sqlite>,
        jti: &str,
        user_id: i64,
        expires_at: i64,
    ) -> Result<(), AppError> {
        let revoked_at = chrono::Utc::now().timestamp();

        sqlx::query(
            r#"
INSERT INTO revoked_tokens (jti, user_id, expires_at, revoked_at)
VALUES (?, ?, ?, ?)
ON CONFLICT(jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .bind(user_id)
        .bind(expires_at)
        .bind(revoked_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn get(
        pool: &Pool<Sqlite>,
        jti: &str,
    ) -> Result<Option<RevokedToken>, AppError> {
        let revoked = sqlx::query_as::<_, RevokedToken>(
            "SELECT * FROM revoked_tokens WHERE jti = ?"
        )
        .bind(jti)
        .fetch_optional(pool)
        .await?;

        Ok(revoked)
    }

    pub async fn is_revoked(pool: &Pool<Sqlite>, jti: &str) -> Result<bool, AppError> {
        Ok(Self::get(pool, jti).await?.is_some())
    }

    /// Drop entries whose tokens would be rejected as expired anyway.
    pub async fn cleanup_expired(pool: &Pool<Sqlite>) -> Result<u64, AppError> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_in_memory, UserRepository};

    #[tokio::test]
    async fn test_revoke_twice() {
        let pool = open_in_memory().await.unwrap();
        let user = UserRepository::create(&pool, "alice", "secret1").await.unwrap();
        let expires_at = chrono::Utc::now().timestamp() + 3600;

        assert!(!RevocationRepository::is_revoked(&pool, "jti-1").await.unwrap());
        RevocationRepository::revoke(&pool, "jti-1", user.id, expires_at).await.unwrap();
        RevocationRepository::revoke(&pool, "jti-1", user.id, expires_at).await.unwrap();

        let revoked = RevocationRepository::get(&pool, "jti-1").await.unwrap().unwrap();
        assert_eq!(revoked.user_id, user.id);
        assert_eq!(revoked.expires_at, expires_at);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let pool = open_in_memory().await.unwrap();
        let user = UserRepository::create(&pool, "alice", "secret1").await.unwrap();
        let now = chrono::Utc::now().timestamp();

        RevocationRepository::revoke(&pool, "old", user.id, now - 10).await.unwrap();
        RevocationRepository::revoke(&pool, "fresh", user.id, now + 3600).await.unwrap();

        assert_eq!(RevocationRepository::cleanup_expired(&pool).await.unwrap(), 1);
        assert!(!RevocationRepository::is_revoked(&pool, "old").await.unwrap());
        assert!(RevocationRepository::is_revoked(&pool, "fresh").await.unwrap());
    }
}
