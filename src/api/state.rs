//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, RoleStore, SessionStore, UserStore};
use crate::services::{AuthService, Authenticator, UserManager, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Visit counters keyed by session cookie
    pub sessions: SessionStore,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the SeaORM-backed services onto an open database.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let roles = Arc::new(RoleStore::new(database.get_connection()));

        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), config)),
            user_service: Arc::new(UserManager::new(users, roles)),
            sessions: SessionStore::new(),
            database,
        }
    }
}
