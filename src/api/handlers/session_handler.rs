//! Per-session visit counter.

use axum::{extract::State, response::Json, routing::get, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use domain::SessionState;

#[derive(Debug, Serialize, ToSchema)]
pub struct VisitsView {
    /// Pages counted for this browser session, including this one
    pub visits: u64,
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/visits", get(visits))
}

/// Session id from the cookie; a missing or malformed one starts a new session.
fn session_id(jar: CookieJar) -> (CookieJar, Uuid) {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

    match existing {
        Some(id) => (jar, id),
        None => {
            let id = Uuid::new_v4();
            let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            (jar.add(cookie), id)
        }
    }
}

/// Count a visit for the caller's session
#[utoipa::path(
    get,
    path = "/visits",
    tag = "Lab",
    responses((status = 200, description = "Updated counter", body = VisitsView))
)]
pub async fn visits(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<VisitsView>) {
    let (jar, id) = session_id(jar);
    let session = state.sessions.update(id, SessionState::record_visit).await;

    tracing::debug!(session = %id, visits = session.visits, "Visit recorded");
    (jar, Json(VisitsView { visits: session.visits }))
}
