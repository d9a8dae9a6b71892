//! User management handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::auth_handler::MessageView;
use crate::api::extractors::{FormData, FormValues};
use crate::api::middleware::{auth_middleware, current_user};
use crate::api::AppState;
use crate::config::{MSG_USER_CREATED, MSG_USER_DELETED, MSG_USER_UPDATED};
use crate::errors::{AppError, AppResult};
use crate::infra::StorageError;
use domain::{
    validate_user_input, FieldErrors, NewUser, Role, User, UserProfile, UserResponse, FIELD_DB,
    FIELD_PASSWORD, MSG_STORAGE_FAILURE,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersView {
    pub users: Vec<UserResponse>,
    /// Whether create/edit/delete actions are offered
    pub can_manage: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserView {
    pub user: UserResponse,
}

/// Create or edit form state.
///
/// Returned empty or prefilled on GET, and with the submitted values and
/// per-field `errors` when a submission is rejected.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserFormView {
    pub errors: FieldErrors,
    pub form: BTreeMap<String, String>,
    pub roles: Vec<Role>,
    /// User being edited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserSavedView {
    pub message: &'static str,
    pub user: UserResponse,
}

/// Create/edit form fields
#[derive(Debug, ToSchema)]
pub struct UserFormSchema {
    /// Create only; Latin letters and digits, 5 or more
    pub login: Option<String>,
    /// Create only
    pub password: Option<String>,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    /// Role id; empty for none
    pub role: Option<String>,
}

pub fn user_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/user/create", get(create_page).post(create_user))
        .route("/user/:id/edit", get(edit_page).post(update_user))
        .route("/user/:id/delete", post(delete_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/users", get(list_users))
        .route("/user/:id", get(get_user))
        .merge(protected)
}

/// Build the 422 answer that redisplays a rejected form.
///
/// The password is never echoed back.
async fn rejected_form(
    state: &AppState,
    errors: FieldErrors,
    form: &FormValues,
    user: Option<User>,
) -> AppResult<Response> {
    let mut values = form.first_values();
    values.remove(FIELD_PASSWORD);

    let view = UserFormView {
        errors,
        form: values,
        roles: state.user_service.list_roles().await?,
        user: user.map(UserResponse::from),
    };

    Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
}

/// Storage failures other than a missing row surface as a form error.
fn storage_failure(err: &AppError) -> bool {
    matches!(err, AppError::Storage(e) if !matches!(e, StorageError::NotFound))
        || matches!(err, AppError::Database(_))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses((status = 200, description = "Users ordered by id", body = UsersView))
)]
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<UsersView>> {
    let can_manage = current_user(&state, &headers).await?.is_some();
    let users = state.user_service.list_users().await?;

    Ok(Json(UsersView {
        users: users.into_iter().map(UserResponse::from).collect(),
        can_manage,
    }))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserView),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserView>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserView {
        user: UserResponse::from(user),
    }))
}

async fn create_page(State(state): State<AppState>) -> AppResult<Json<UserFormView>> {
    Ok(Json(UserFormView {
        errors: FieldErrors::new(),
        form: BTreeMap::new(),
        roles: state.user_service.list_roles().await?,
        user: None,
    }))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/user/create",
    tag = "Users",
    request_body(content = UserFormSchema, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "User created", body = UserSavedView),
        (status = 401, description = "Not logged in"),
        (status = 422, description = "Form rejected", body = UserFormView)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    FormData(form): FormData,
) -> AppResult<Response> {
    let errors = validate_user_input(&form, true, true);
    if !errors.is_empty() {
        return rejected_form(&state, errors, &form, None).await;
    }

    match state.user_service.create_user(NewUser::from_fields(&form)).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(UserSavedView {
                message: MSG_USER_CREATED,
                user: UserResponse::from(user),
            }),
        )
            .into_response()),
        Err(e) if storage_failure(&e) => {
            tracing::error!("Failed to create user: {}", e);
            let errors = FieldErrors::single(FIELD_DB, MSG_STORAGE_FAILURE);
            rejected_form(&state, errors, &form, None).await
        }
        Err(e) => Err(e),
    }
}

async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserFormView>> {
    let user = state.user_service.get_user(id).await?;

    Ok(Json(UserFormView {
        errors: FieldErrors::new(),
        form: user.profile().to_form_values(),
        roles: state.user_service.list_roles().await?,
        user: Some(UserResponse::from(user)),
    }))
}

/// Update names and role of a user
#[utoipa::path(
    post,
    path = "/user/{id}/edit",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body(content = UserFormSchema, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User updated", body = UserSavedView),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Form rejected", body = UserFormView)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormData(form): FormData,
) -> AppResult<Response> {
    let user = state.user_service.get_user(id).await?;

    let errors = validate_user_input(&form, false, false);
    if !errors.is_empty() {
        return rejected_form(&state, errors, &form, Some(user)).await;
    }

    match state
        .user_service
        .update_user(id, UserProfile::from_fields(&form))
        .await
    {
        Ok(updated) => Ok(Json(UserSavedView {
            message: MSG_USER_UPDATED,
            user: UserResponse::from(updated),
        })
        .into_response()),
        Err(e) if storage_failure(&e) => {
            tracing::error!(user_id = id, "Failed to update user: {}", e);
            let errors = FieldErrors::single(FIELD_DB, MSG_STORAGE_FAILURE);
            rejected_form(&state, errors, &form, Some(user)).await
        }
        Err(e) => Err(e),
    }
}

/// Delete a user
#[utoipa::path(
    post,
    path = "/user/{id}/delete",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageView),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageView>> {
    state.user_service.delete_user(id).await?;
    Ok(Json(MessageView {
        message: MSG_USER_DELETED,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failure_classification() {
        assert!(storage_failure(&AppError::Storage(StorageError::Conflict(
            "users.login".into()
        ))));
        assert!(!storage_failure(&AppError::Storage(StorageError::NotFound)));
        assert!(!storage_failure(&AppError::NotFound));
        assert!(!storage_failure(&AppError::Unauthorized));
    }
}
