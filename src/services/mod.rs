//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits, so tests can
//! swap in mocks.

mod auth_service;
mod user_service;

pub use auth_service::{AuthService, AuthToken, Authenticator, Claims};
pub use user_service::{UserManager, UserService};
