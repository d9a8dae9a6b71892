//! Login, logout and password change handlers.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Extension, Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::config::{AUTH_COOKIE, MSG_LOGGED_IN, MSG_LOGGED_OUT, MSG_PASSWORD_CHANGED};
use crate::errors::{AppError, AppResult};
use crate::services::AuthToken;
use domain::{FieldErrors, UserResponse};

/// Login form submission
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    #[schema(example = "admin")]
    pub username: String,
    pub password: String,
    /// Any non-empty value keeps the login across browser restarts
    #[schema(example = "on")]
    pub remember: String,
}

impl LoginForm {
    fn remember(&self) -> bool {
        !self.remember.is_empty()
    }
}

/// Change password form submission
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    /// Must repeat `new_password`
    pub new_password2: String,
}

/// Flash-style confirmation
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageView {
    pub message: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginView {
    pub message: &'static str,
    pub user: UserResponse,
}

/// Names of the fields a page expects
#[derive(Debug, Serialize)]
pub struct FormPageView {
    pub fields: &'static [&'static str],
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SecretView {
    pub title: &'static str,
    pub user: UserResponse,
}

/// Change password form state; `errors` is keyed by field name
#[derive(Debug, Serialize, ToSchema)]
pub struct ChangePasswordView {
    pub errors: FieldErrors,
}

pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", get(logout))
        .route("/secret", get(secret))
        .route(
            "/change_password",
            get(change_password_page).post(change_password),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/login", get(login_page).post(login))
        .merge(protected)
}

/// Login cookie for a freshly issued token.
///
/// Without "remember me" it is a browser-session cookie.
fn auth_cookie(token: AuthToken) -> Cookie<'static> {
    let cookie = Cookie::build((AUTH_COOKIE, token.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    if token.persistent {
        cookie.max_age(time::Duration::seconds(token.expires_in)).build()
    } else {
        cookie.build()
    }
}

async fn login_page() -> Json<FormPageView> {
    Json(FormPageView {
        fields: &["username", "password", "remember"],
    })
}

/// Log in and receive the login cookie
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Logged in; `auth_token` cookie set", body = LoginView),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, Json<LoginView>)> {
    let user = state
        .auth_service
        .authenticate(&form.username, &form.password)
        .await?;
    let token = state.auth_service.issue_token(&user, form.remember())?;

    Ok((
        jar.add(auth_cookie(token)),
        Json(LoginView {
            message: MSG_LOGGED_IN,
            user: UserResponse::from(user),
        }),
    ))
}

/// Log out and clear the login cookie
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Logged out", body = MessageView),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn logout(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageView>) {
    tracing::info!(user_id = user.id, "User logged out");
    (
        jar.remove(Cookie::build(AUTH_COOKIE).path("/")),
        Json(MessageView {
            message: MSG_LOGGED_OUT,
        }),
    )
}

/// Page reserved for logged-in users
#[utoipa::path(
    get,
    path = "/secret",
    tag = "Authentication",
    responses(
        (status = 200, description = "Secret page", body = SecretView),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn secret(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<SecretView> {
    Json(SecretView {
        title: "Секретная страница",
        user: UserResponse::from(user),
    })
}

async fn change_password_page() -> Json<ChangePasswordView> {
    Json(ChangePasswordView {
        errors: FieldErrors::new(),
    })
}

/// Change the current user's password
#[utoipa::path(
    post,
    path = "/change_password",
    tag = "Authentication",
    request_body(content = ChangePasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Password changed", body = MessageView),
        (status = 401, description = "Not logged in"),
        (status = 422, description = "Form errors by field", body = ChangePasswordView)
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<ChangePasswordForm>,
) -> AppResult<Response> {
    let result = state
        .auth_service
        .change_password(&user, &form.old_password, &form.new_password, &form.new_password2)
        .await;

    match result {
        Ok(()) => Ok(Json(MessageView {
            message: MSG_PASSWORD_CHANGED,
        })
        .into_response()),
        Err(AppError::InvalidForm(errors)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ChangePasswordView { errors }),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(persistent: bool) -> AuthToken {
        AuthToken {
            token: "signed".to_string(),
            expires_in: 604_800,
            persistent,
        }
    }

    #[test]
    fn test_session_cookie_has_no_max_age() {
        let cookie = auth_cookie(token(false));
        assert_eq!(cookie.name(), AUTH_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), None);
    }

    #[test]
    fn test_remembered_cookie_is_persistent() {
        let cookie = auth_cookie(token(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn test_remember_flag() {
        let mut form = LoginForm::default();
        assert!(!form.remember());
        form.remember = "on".to_string();
        assert!(form.remember());
    }
}
