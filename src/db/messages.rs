use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::db::models::Message;
use crate::error::AppError;

pub struct MessageRepository;

impl MessageRepository {
    /// Append a message to the room and return its id.
    pub async fn append(
        pool: &Pool<Sqlite>,
        user_id: i64,
        content: &str,
    ) -> Result<i64, AppError> {
        if content.is_empty() {
            return Err(AppError::EmptyContent);
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"
INSERT INTO messages (user_id, content, timestamp)
VALUES (?, ?, ?)
RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// The whole history, oldest first. Ties on timestamp keep insertion order.
    pub async fn list_all(pool: &Pool<Sqlite>) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
SELECT m.id, m.user_id, u.username, m.content, m.timestamp
FROM messages m
JOIN users u ON m.user_id = u.id
ORDER BY m.timestamp ASC, m.id ASC
            "#
        )
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_in_memory, UserRepository};

    #[tokio::test]
    async fn test_append_rejects_empty_content() {
        let pool = open_in_memory().await.unwrap();
        let user = UserRepository::create(&pool, "alice", "secret1").await.unwrap();

        let err = MessageRepository::append(&pool, user.id, "").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyContent));
        assert!(MessageRepository::list_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_content_is_stored_verbatim() {
        let pool = open_in_memory().await.unwrap();
        let user = UserRepository::create(&pool, "alice", "secret1").await.unwrap();

        let content = "  <b>hi</b>\n";
        MessageRepository::append(&pool, user.id, content).await.unwrap();

        let messages = MessageRepository::list_all(&pool).await.unwrap();
        assert_eq!(messages[0].content, content);
        assert_eq!(messages[0].username, "alice");
    }

    #[tokio::test]
    async fn test_list_all_keeps_insertion_order() {
        let pool = open_in_memory().await.unwrap();
        let user = UserRepository::create(&pool, "alice", "secret1").await.unwrap();

        let mut ids = Vec::new();
        for content in ["m1", "m2", "m3"] {
            ids.push(MessageRepository::append(&pool, user.id, content).await.unwrap());
        }

        let messages = MessageRepository::list_all(&pool).await.unwrap();
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["m1", "m2", "m3"]);
        assert_eq!(messages.iter().map(|m| m.id).collect::<Vec<_>>(), ids);
    }

    #[tokio::test]
    async fn test_timestamp_collisions_fall_back_to_id() {
        let pool = open_in_memory().await.unwrap();
        let user = UserRepository::create(&pool, "alice", "secret1").await.unwrap();
        let now = Utc::now();

        for content in ["m1", "m2", "m3"] {
            sqlx::query("INSERT INTO messages (user_id, content, timestamp) VALUES (?, ?, ?)")
                .bind(user.id)
                .bind(content)
                .bind(now)
                .execute(&pool)
                .await
                .unwrap();
        }

        let messages = MessageRepository::list_all(&pool).await.unwrap();
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["m1", "m2", "m3"]);
    }

    #[tokio::test]
    async fn test_view_marks_authorship() {
        let pool = open_in_memory().await.unwrap();
        let alice = UserRepository::create(&pool, "alice", "secret1").await.unwrap();
        let bob = UserRepository::create(&pool, "bob", "secret1").await.unwrap();
        MessageRepository::append(&pool, alice.id, "hi").await.unwrap();

        let message = MessageRepository::list_all(&pool).await.unwrap().remove(0);
        assert!(message.clone().view_for(alice.id).is_author);

        let seen_by_bob = message.view_for(bob.id);
        assert!(!seen_by_bob.is_author);
        assert!(!seen_by_bob.is_read);
        assert_eq!(seen_by_bob.username, "alice");
    }
}
