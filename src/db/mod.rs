pub mod models;
pub mod users;
pub mod revocations;
pub mod messages;

pub use models::{User, RevokedToken, Message, MessageView};
pub use users::UserRepository;
pub use revocations::RevocationRepository;
pub use messages::MessageRepository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::config::Config;
use crate::error::AppError;

/// Open the store and bring its schema up to date. The pool is closed by
/// the caller once the server has shut down.
pub async fn open(config: &Config) -> Result<Pool<Sqlite>, AppError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// A private in-memory store. Limited to a single connection that never
/// expires, since every SQLite memory connection is its own database.
pub async fn open_in_memory() -> Result<Pool<Sqlite>, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

async fn migrate(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))
}
