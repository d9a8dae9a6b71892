//! Domain layer - validation rules, entities and value objects.
//!
//! This crate holds the pure parts of the lab portal: the phone number
//! normalizer, the credential validators, and the user/role model. Nothing
//! here performs I/O, so every function is safe to call from any number of
//! requests at once.

pub mod constants;
pub mod credentials;
pub mod error;
pub mod form;
pub mod password;
pub mod phone;
pub mod session;
pub mod user;

pub use constants::*;
pub use credentials::{
    is_valid_login, join_violations, validate_password, validate_password_change,
    validate_user_input, PasswordViolation,
};
pub use error::{DomainError, DomainResult};
pub use form::{FieldErrors, FormFields};
pub use password::Password;
pub use phone::{normalize, PhoneRejection, PhoneVerdict};
pub use session::SessionState;
pub use user::{NewUser, Role, User, UserProfile, UserResponse};
