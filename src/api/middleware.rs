use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::state::AppState;
use crate::db::RevocationRepository;
use crate::error::AppError;

/// The authenticated principal behind a request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub token_id: String,
    pub expires_at: i64,
}

/// Resolve the bearer token on a request to an identity. Every failure
/// (missing header, bad signature, expiry, revocation) is `Unauthenticated`.
pub async fn authenticate_request(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Identity, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthenticated)?;

    let claims = state.tokens.verify(token)?;

    if RevocationRepository::is_revoked(&state.db, &claims.jti).await? {
        tracing::debug!("Rejected revoked token for user {}", claims.user_id);
        return Err(AppError::Unauthenticated);
    }

    Ok(Identity {
        user_id: claims.user_id,
        username: claims.username,
        token_id: claims.jti,
        expires_at: claims.exp,
    })
}

/// Authentication middleware - stores the caller's Identity in request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = authenticate_request(&state, request.headers()).await?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
