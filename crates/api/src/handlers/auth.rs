//! Auth placeholder handlers. Every login and registration succeeds.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_token_pair, validate_token, JwtConfig, TokenKind, UserProfile};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    /// Accepted and ignored.
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(alias = "refresh_token")]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

fn issue(user: UserProfile, config: &JwtConfig) -> AppResult<Json<AuthResponse>> {
    let pair = generate_token_pair(&user, config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    Ok(Json(AuthResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        user,
    }))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserProfile::for_email(&input.email, None, None);
    tracing::info!(user_id = %user.id, "User logged in");
    issue(user, &state.config.jwt)
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserProfile::for_email(&input.email, Some(input.name), input.phone);
    tracing::info!(user_id = %user.id, "User registered");
    issue(user, &state.config.jwt)
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let claims = validate_token(&input.refresh_token, TokenKind::Refresh, &state.config.jwt)
        .map_err(|_| AppError::BadRequest("Invalid or expired refresh token".into()))?;
    issue(claims.profile(), &state.config.jwt)
}

/// GET /api/v1/auth/me
pub async fn me(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(user)
}
