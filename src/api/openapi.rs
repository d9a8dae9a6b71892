//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for exploring the pages.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, lab_handler, session_handler, user_handler};
use crate::config::AUTH_COOKIE;
use domain::{FieldErrors, PhoneRejection, Role, UserResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lab Portal",
        version = "0.1.0",
        description = "Teaching-lab site: request inspection, phone normalization, sessions and user management"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        lab_handler::phone_page,
        lab_handler::check_phone,
        session_handler::visits,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::secret,
        auth_handler::change_password,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            // Domain types
            UserResponse,
            Role,
            FieldErrors,
            PhoneRejection,
            // Lab pages
            lab_handler::PhoneForm,
            lab_handler::PhoneView,
            session_handler::VisitsView,
            // Auth pages
            auth_handler::LoginForm,
            auth_handler::LoginView,
            auth_handler::ChangePasswordForm,
            auth_handler::ChangePasswordView,
            auth_handler::MessageView,
            auth_handler::SecretView,
            // User pages
            user_handler::UsersView,
            user_handler::UserView,
            user_handler::UserFormView,
            user_handler::UserFormSchema,
            user_handler::UserSavedView,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Lab", description = "Phone checker and visit counter"),
        (name = "Authentication", description = "Login cookie and password change"),
        (name = "Users", description = "User management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the login cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    AUTH_COOKIE,
                    "JWT set by POST /login",
                ))),
            );
        }
    }
}
