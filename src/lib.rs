//! Lab Portal - a teaching web application.
//!
//! Request inspection pages, a phone number normalizer, cookie based
//! login and a small user/role administration, served with Axum over
//! SQLite.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **services**: Authentication and user management use cases
//! - **infra**: Database, repositories and the visit counter store
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! Validation rules and the user model live in the `domain` crate.
//!
//! # CLI Usage
//!
//! ```bash
//! # Create the schema, default roles and the administrator
//! cargo run -- migrate up
//! cargo run -- seed
//!
//! # Start the server
//! cargo run -- serve --port 8080
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Role, User};
pub use errors::{AppError, AppResult};
