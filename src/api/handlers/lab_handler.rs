//! Request inspection pages and the phone number checker.

use std::collections::BTreeMap;

use axum::{
    extract::Query,
    http::HeaderMap,
    response::Json,
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::extractors::{FormData, FormValues};
use crate::api::AppState;
use crate::config::{LAB_COOKIE, LAB_COOKIE_DAYS, MSG_COOKIE_REMOVED, MSG_COOKIE_SET};
use domain::{normalize, PhoneRejection, PhoneVerdict};

/// Echo of request data shown by the inspection pages
#[derive(Debug, Serialize)]
pub struct ParamsView<T> {
    pub title: &'static str,
    pub items: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T> ParamsView<T> {
    fn new(title: &'static str, items: T) -> Self {
        Self {
            title,
            items,
            message: None,
        }
    }
}

/// Phone form submission
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PhoneForm {
    /// Number as typed, e.g. `+7 (912) 345-67-89`
    pub phone: String,
}

/// Result of a phone number check
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct PhoneView {
    /// Submitted value, echoed back
    pub phone: String,
    /// Message shown next to the field
    pub error: Option<String>,
    pub invalid_type: Option<PhoneRejection>,
    /// Canonical `8-XXX-XXX-XX-XX` form
    pub formatted: Option<String>,
}

impl PhoneView {
    fn check(phone: &str) -> Self {
        let mut view = PhoneView {
            phone: phone.to_string(),
            ..Default::default()
        };

        match normalize(phone) {
            PhoneVerdict::Accepted { formatted } => view.formatted = Some(formatted),
            PhoneVerdict::Rejected { reason } => {
                view.error = Some(reason.to_string());
                view.invalid_type = Some(reason);
            }
        }

        view
    }
}

pub fn lab_routes() -> Router<AppState> {
    Router::new()
        .route("/show/url", get(show_url))
        .route("/show/headers", get(show_headers))
        .route("/show/cookies", get(show_cookies))
        .route("/show/form", get(form_page).post(submit_form))
        .route("/phone", get(phone_page).post(check_phone))
}

/// Every query parameter, keeping repeated ones.
async fn show_url(
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<ParamsView<BTreeMap<String, Vec<String>>>> {
    Json(ParamsView::new(
        "Параметры URL",
        FormValues::from_pairs(pairs).into_all(),
    ))
}

async fn show_headers(headers: HeaderMap) -> Json<ParamsView<BTreeMap<String, String>>> {
    let mut items: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in &headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        items
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }

    Json(ParamsView::new("Заголовки запроса", items))
}

/// Show the request cookies and flip the demo cookie.
///
/// The page lists cookies as they arrived, before the toggle.
async fn show_cookies(jar: CookieJar) -> (CookieJar, Json<ParamsView<BTreeMap<String, String>>>) {
    let items: BTreeMap<String, String> = jar
        .iter()
        .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
        .collect();
    let mut view = ParamsView::new("Cookie", items);

    let jar = if jar.get(LAB_COOKIE).is_some() {
        view.message = Some(MSG_COOKIE_REMOVED);
        jar.remove(Cookie::build(LAB_COOKIE).path("/"))
    } else {
        view.message = Some(MSG_COOKIE_SET);
        jar.add(
            Cookie::build((LAB_COOKIE, "1"))
                .path("/")
                .max_age(time::Duration::days(LAB_COOKIE_DAYS)),
        )
    };

    (jar, Json(view))
}

async fn form_page() -> Json<ParamsView<BTreeMap<String, Vec<String>>>> {
    Json(ParamsView::new("Параметры формы", BTreeMap::new()))
}

async fn submit_form(FormData(form): FormData) -> Json<ParamsView<BTreeMap<String, Vec<String>>>> {
    Json(ParamsView::new("Параметры формы", form.into_all()))
}

/// Empty phone check form
#[utoipa::path(
    get,
    path = "/phone",
    tag = "Lab",
    responses((status = 200, description = "Empty form", body = PhoneView))
)]
pub async fn phone_page() -> Json<PhoneView> {
    Json(PhoneView::default())
}

/// Validate a phone number and show its canonical form
#[utoipa::path(
    post,
    path = "/phone",
    tag = "Lab",
    request_body(content = PhoneForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Check result; `error` is set when the number is rejected", body = PhoneView)
    )
)]
pub async fn check_phone(Form(form): Form<PhoneForm>) -> Json<PhoneView> {
    Json(PhoneView::check(&form.phone))
}
