//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories over the `users` and `roles` tables
//! - Server-side session storage

pub mod db;
mod error;
pub mod repositories;
mod sessions;

pub use db::{Database, Migrator};
pub use error::{StorageError, StorageResult};
pub use repositories::{RoleRepository, RoleStore, UserRepository, UserStore};
pub use sessions::SessionStore;

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockRoleRepository, MockUserRepository};
