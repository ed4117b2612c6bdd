use axum::{
    extract::State,
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::Identity;
use crate::api::state::AppState;
use crate::db::{RevocationRepository, UserRepository};
use crate::error::{AppError, PASSWORD_MISMATCH, PASSWORD_RULES, USERNAME_RULES};
use crate::validation::{validate_password, validate_username};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    fn success(message: &str) -> Json<Self> {
        Json(Self {
            status: "success".to_string(),
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    pub message: String,
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
    pub username: String,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Form(req): Form<RegisterRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let username = req.username.trim();
    let password = req.password.trim();

    if !validate_username(username) {
        return Err(AppError::Validation(USERNAME_RULES.to_string()));
    }

    if !validate_password(password) {
        return Err(AppError::Validation(PASSWORD_RULES.to_string()));
    }

    if password != req.confirm_password.trim() {
        return Err(AppError::Validation(PASSWORD_MISMATCH.to_string()));
    }

    let user = UserRepository::create(&state.db, username, password).await?;
    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok(StatusResponse::success("Регистрация прошла успешно! Теперь вы можете войти."))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Form(req): Form<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = UserRepository::authenticate(
        &state.db,
        req.username.trim(),
        req.password.trim(),
    )
    .await?;

    let issued = state.tokens.issue(user.id, &user.username)?;
    tracing::info!("User {} logged in", user.username);

    Ok(Json(LoginResponse {
        status: "success".to_string(),
        message: "Login successful".to_string(),
        token: issued.token,
        username: user.username,
    }))
}

/// GET /logout (requires auth)
pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<StatusResponse>, AppError> {
    UserRepository::set_offline(&state.db, identity.user_id).await?;

    RevocationRepository::revoke(
        &state.db,
        &identity.token_id,
        identity.user_id,
        identity.expires_at,
    )
    .await?;

    let pruned = RevocationRepository::cleanup_expired(&state.db).await?;
    if pruned > 0 {
        tracing::debug!("Pruned {} expired token revocations", pruned);
    }

    tracing::info!("User {} logged out", identity.username);

    Ok(StatusResponse::success("Logged out successfully"))
}

/// GET /check_auth (requires auth)
pub async fn check_auth(
    Extension(identity): Extension<Identity>,
) -> Json<CheckAuthResponse> {
    Json(CheckAuthResponse {
        authenticated: true,
        username: identity.username,
    })
}
