use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub online: bool,
    pub last_seen: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RevokedToken {
    pub jti: String,
    pub user_id: i64,
    pub expires_at: i64,
    pub revoked_at: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub user_id: i64,
    pub username: String, // Joined from users table
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A message as one particular reader sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageView {
    pub id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub is_author: bool,
    /// Read receipts are not tracked; always false.
    pub is_read: bool,
    pub username: String,
}

impl Message {
    pub fn view_for(self, viewer_id: i64) -> MessageView {
        MessageView {
            is_author: self.user_id == viewer_id,
            is_read: false,
            id: self.id,
            content: self.content,
            timestamp: self.timestamp,
            username: self.username,
        }
    }
}
