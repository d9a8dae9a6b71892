//! Cookie-based authentication middleware.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::config::AUTH_COOKIE;
use crate::errors::{AppError, AppResult};
use domain::User;

/// Logged-in user, resolved from the login cookie
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Resolve the user behind the login cookie, if any.
///
/// Invalid tokens and tokens of deleted users count as "not logged in".
pub async fn current_user(state: &AppState, headers: &HeaderMap) -> AppResult<Option<User>> {
    let jar = CookieJar::from_headers(headers);
    let Some(cookie) = jar.get(AUTH_COOKIE) else {
        return Ok(None);
    };

    let claims = match state.auth_service.verify_token(cookie.value()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Rejected login cookie: {}", e);
            return Ok(None);
        }
    };

    match state.user_service.get_user(claims.sub).await {
        Ok(user) => Ok(Some(user)),
        Err(AppError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Authentication middleware.
///
/// Loads the user behind the login cookie and injects [`CurrentUser`]
/// into the request extensions; requests without one are rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = current_user(&state, request.headers())
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
