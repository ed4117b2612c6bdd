use thiserror::Error;

use crate::crypto::TokenError;

pub const USERNAME_RULES: &str =
    "Имя пользователя должно быть от 3 до 20 символов и не содержать пробелов";
pub const PASSWORD_RULES: &str =
    "Пароль должен быть от 5 до 50 символов и не содержать пробелов";
pub const PASSWORD_MISMATCH: &str = "Пароли не совпадают";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    AuthFailure,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("No content provided")]
    EmptyContent,

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

// Expired and invalid tokens look the same to clients.
impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        tracing::debug!("Rejected bearer token: {}", err);
        AppError::Unauthenticated
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DuplicateUsername => (
                StatusCode::BAD_REQUEST,
                "Это имя пользователя уже занято".to_string(),
            ),
            AppError::AuthFailure => (
                StatusCode::UNAUTHORIZED,
                "Неверное имя пользователя или пароль".to_string(),
            ),
            AppError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            AppError::EmptyContent => {
                (StatusCode::BAD_REQUEST, "No content provided".to_string())
            }
            err @ (AppError::Crypto(_)
            | AppError::Database(_)
            | AppError::Config(_)
            | AppError::Internal(_)) => {
                tracing::error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "status": "error",
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
