// ============================================================================
// SSO API - Auth Handlers
// File: crates/sso-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (login, logout, session)

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use sso_core::UserInfo;

use crate::error::ApiError;
use crate::extract::{AuthenticatedUser, LoginPayload};
use crate::response::ApiResponse;
use crate::state::AppState;

/// User DTO for responses
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
}

impl From<UserInfo> for UserDto {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id.to_string(),
            display_name: user.display_name,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionDto {
    pub user_id: String,
    pub role: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub message: String,
}

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    LoginPayload(credentials): LoginPayload,
) -> Result<(HeaderMap, Json<ApiResponse<UserDto>>), ApiError> {
    let result = state.auth.login(credentials).await?;

    let mut headers = HeaderMap::new();
    state
        .session
        .attach(&result.token.token, &mut headers)
        .map_err(|e| ApiError::Internal(format!("Failed to build session cookie: {}", e)))?;

    Ok((headers, Json(ApiResponse::success(UserDto::from(result.user)))))
}

/// Logout handler - GET|POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let current = state
        .session
        .extract(&headers)
        .and_then(|token| state.auth.authenticate(&token).ok());
    state.auth.logout(current);

    // Always clear the cookie, even if there was no session.
    let mut response_headers = HeaderMap::new();
    state
        .session
        .clear(&mut response_headers)
        .map_err(|e| ApiError::Internal(format!("Failed to build session clearing cookie: {}", e)))?;
    Ok((
        StatusCode::OK,
        response_headers,
        Json(ApiResponse::success(MessageDto {
            message: "Logged out successfully".to_string(),
        })),
    ))
}

/// Session handler - GET /api/v1/auth/session
pub async fn session(
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Json<ApiResponse<SessionDto>> {
    Json(ApiResponse::success(SessionDto {
        user_id: claims.sub,
        role: claims.role.as_str().to_string(),
        issued_at: claims.iat,
        expires_at: claims.exp,
    }))
}
