use rand::{distributions::Alphanumeric, Rng};

use crate::error::AppError;

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub request_timeout_secs: u64,
    pub jwt_secret: String,
    pub token_expiry_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set, tokens will not survive a restart");
                random_secret()
            }
        };

        Ok(Config {
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: parse_var("SERVER_PORT", "8300")?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://boost_messenger.db".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "20")?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", "1")?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30")?,
            jwt_secret,
            token_expiry_hours: parse_var("TOKEN_EXPIRY_HOURS", "24")?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e)))
}

fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = ["SERVER_PORT", "TOKEN_EXPIRY_HOURS", "JWT_SECRET", "DB_MAX_CONNECTIONS"];

    fn clear() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear();
        let config = Config::from_env().unwrap();
        assert_eq!(config.server_port, 8300);
        assert_eq!(config.token_expiry_hours, 24);
        assert_eq!(config.jwt_secret.len(), 48);
        assert_eq!(config.server_address(), format!("{}:8300", config.server_host));
    }

    #[test]
    #[serial]
    fn test_custom_values() {
        clear();
        std::env::set_var("SERVER_PORT", "9000");
        std::env::set_var("JWT_SECRET", "not-so-secret");
        std::env::set_var("TOKEN_EXPIRY_HOURS", "1");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.jwt_secret, "not-so-secret");
        assert_eq!(config.token_expiry_hours, 1);

        clear();
    }

    #[test]
    #[serial]
    fn test_invalid_number() {
        clear();
        std::env::set_var("DB_MAX_CONNECTIONS", "lots");

        let err = Config::from_env().err().unwrap();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("DB_MAX_CONNECTIONS")));

        clear();
    }
}
