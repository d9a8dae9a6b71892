//! User service - Account management use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::{RoleRepository, StorageError, UserRepository};
use domain::{NewUser, Password, Role, User, UserProfile, DEFAULT_ROLES};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// All users, ordered by id
    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Create an account from an already validated form; the password is hashed here.
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Replace names and role of an existing user
    async fn update_user(&self, id: i32, profile: UserProfile) -> AppResult<User>;

    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Insert any missing default role and return every role.
    async fn ensure_default_roles(&self) -> AppResult<Vec<Role>>;
}

/// Concrete implementation of UserService
pub struct UserManager<U: UserRepository, R: RoleRepository> {
    users: Arc<U>,
    roles: Arc<R>,
}

impl<U: UserRepository, R: RoleRepository> UserManager<U, R> {
    pub fn new(users: Arc<U>, roles: Arc<R>) -> Self {
        Self { users, roles }
    }
}

fn not_found(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound => AppError::NotFound,
        other => AppError::Storage(other),
    }
}

#[async_trait]
impl<U: UserRepository, R: RoleRepository> UserService for UserManager<U, R> {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        Ok(self.users.find_by_login(login).await?)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.list().await?)
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.list().await?)
    }

    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let password_hash = Password::hash(&new_user.password)?.into_string();

        let user = self
            .users
            .insert(new_user.login, password_hash, new_user.profile)
            .await?;

        tracing::info!(user_id = user.id, login = %user.login, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: i32, profile: UserProfile) -> AppResult<User> {
        let user = self.users.update_profile(id, profile).await.map_err(not_found)?;

        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.users.delete(id).await.map_err(not_found)?;

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn ensure_default_roles(&self) -> AppResult<Vec<Role>> {
        for (name, description) in DEFAULT_ROLES {
            if self.roles.find_by_name(name).await?.is_none() {
                self.roles
                    .insert(name, Some((*description).to_string()))
                    .await?;
                tracing::info!(role = %name, "Role created");
            }
        }

        self.list_roles().await
    }
}
