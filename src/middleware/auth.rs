//! Request authentication gate
//!
//! Middleware that gates every route outside a static allow-list. The
//! credential is the `access_token` cookie; a missing cookie, a token
//! that fails signature/expiry checks, an unknown subject, and any
//! internal failure during resolution all collapse into the same generic
//! 401 response, so clients never learn which check failed.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::ApiError;
use crate::models::User;
use crate::state::AppState;

/// Name of the cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Path prefixes exempt from credential enforcement
const ALLOW_LIST: &[&str] = &[
    "/auth/login",
    "/auth/register",
    "/auth/refresh",
    "/health",
    "/docs",
];

/// The authenticated principal, attached to request extensions on ALLOW
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

fn unauthorized() -> Response {
    ApiError::Unauthorized("Authentication required".to_string()).into_response()
}

fn is_allow_listed(path: &str) -> bool {
    path == "/" || ALLOW_LIST.iter().any(|prefix| path.starts_with(prefix))
}

/// Authentication middleware. Layered ahead of all business routes.
pub async fn auth_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if is_allow_listed(request.uri().path()) {
        return next.run(request).await;
    }

    let token = match jar.get(ACCESS_TOKEN_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => return unauthorized(),
    };

    let claims = match state.auth_service.signer().decode(&token) {
        Ok(claims) => claims,
        Err(_) => return unauthorized(),
    };

    // Lookup failures and database errors are indistinguishable from a
    // bad token to the client
    let user = match state.auth_service.find_user_by_username(&claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) | Err(_) => return unauthorized(),
    };

    request.extensions_mut().insert(CurrentUser(user));

    next.run(request).await
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(unauthorized)
    }
}
