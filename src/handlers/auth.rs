//! Authentication HTTP handlers

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::{CurrentUser, ACCESS_TOKEN_COOKIE};
use crate::models::{
    AuthTokensResponse, LoginRequest, RefreshRequest, RegisterRequest, UserResponse,
};
use crate::state::AppState;

fn access_token_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /auth/register - Create a new user
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate()?;

    let user = state.auth_service.register(&req.username, &req.password).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /auth/login - Verify credentials and issue tokens
///
/// The access token is returned in the body and also set as the
/// `access_token` cookie used by the auth gate.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthTokensResponse>), ApiError> {
    req.validate()?;

    let tokens = state.auth_service.login(&req.username, &req.password).await?;

    let jar = jar.add(access_token_cookie(&tokens.access_token));

    Ok((jar, Json(tokens)))
}

/// POST /auth/refresh - Exchange a refresh token for a new access token
///
/// The refresh token is echoed back unchanged; only the access token is
/// reissued.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RefreshRequest>,
) -> Result<(CookieJar, Json<AuthTokensResponse>), ApiError> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;

    let jar = jar.add(access_token_cookie(&tokens.access_token));

    Ok((jar, Json(tokens)))
}

/// POST /auth/logout - Revoke all refresh tokens for the current user
pub async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), ApiError> {
    state.auth_service.logout(user.0.id).await?;

    let jar = jar.remove(Cookie::from(ACCESS_TOKEN_COOKIE));

    Ok((jar, StatusCode::NO_CONTENT))
}

/// GET /auth/me - Get the current authenticated user
pub async fn me(user: CurrentUser) -> Json<UserResponse> {
    Json(user.0.into())
}
