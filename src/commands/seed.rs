//! Seed command - Default roles and the administrator account.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, RoleStore, UserStore};
use crate::services::{UserManager, UserService};
use domain::{is_valid_login, join_violations, validate_password, NewUser, UserProfile, ROLE_ADMIN};

/// Execute the seed command.
///
/// Safe to run repeatedly: existing roles and an existing administrator
/// are left untouched.
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let users = UserManager::new(
        Arc::new(UserStore::new(db.get_connection())),
        Arc::new(RoleStore::new(db.get_connection())),
    );

    seed(&users, &config).await
}

async fn seed(users: &dyn UserService, config: &Config) -> AppResult<()> {
    let roles = users.ensure_default_roles().await?;
    tracing::info!("{} roles available", roles.len());

    if users.find_by_login(&config.admin_login).await?.is_some() {
        tracing::info!(login = %config.admin_login, "Administrator already exists");
        return Ok(());
    }

    let Some(password) = config.admin_password() else {
        tracing::warn!("ADMIN_PASSWORD not set, skipping administrator account");
        return Ok(());
    };

    if !is_valid_login(&config.admin_login) {
        return Err(AppError::validation(format!(
            "ADMIN_LOGIN rejected: {}",
            config.admin_login
        )));
    }

    let violations = validate_password(password);
    if !violations.is_empty() {
        return Err(AppError::validation(format!(
            "ADMIN_PASSWORD rejected: {}",
            join_violations(&violations)
        )));
    }

    let admin_role = roles.iter().find(|role| role.name == ROLE_ADMIN);
    let admin = users
        .create_user(NewUser {
            login: config.admin_login.clone(),
            password: password.to_string(),
            profile: UserProfile {
                last_name: Some("Администратор".to_string()),
                first_name: Some("Admin".to_string()),
                patronymic: None,
                role_id: admin_role.map(|role| role.id),
            },
        })
        .await?;

    tracing::info!(user_id = admin.id, login = %admin.login, "Administrator created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockRoleRepository, MockUserRepository};
    use chrono::Utc;
    use domain::{Role, User};

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn roles() -> MockRoleRepository {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_name().returning(|name| {
            Ok(Some(Role {
                id: if name == ROLE_ADMIN { 1 } else { 2 },
                name: name.to_string(),
                description: None,
            }))
        });
        roles.expect_list().returning(|| {
            Ok(vec![
                Role {
                    id: 1,
                    name: ROLE_ADMIN.to_string(),
                    description: None,
                },
                Role {
                    id: 2,
                    name: "user".to_string(),
                    description: None,
                },
            ])
        });
        roles
    }

    fn manager(users: MockUserRepository) -> UserManager<MockUserRepository, MockRoleRepository> {
        UserManager::new(Arc::new(users), Arc::new(roles()))
    }

    #[tokio::test]
    async fn test_seed_creates_admin_with_admin_role() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_login().returning(|_| Ok(None));
        users
            .expect_insert()
            .withf(|login, _, profile| login == "root1" && profile.role_id == Some(1))
            .times(1)
            .returning(|login, password_hash, profile| {
                Ok(User {
                    id: 1,
                    login,
                    password_hash,
                    last_name: profile.last_name,
                    first_name: profile.first_name,
                    patronymic: None,
                    role_id: profile.role_id,
                    role: None,
                    created_at: Utc::now(),
                })
            });

        let config = Config::new("sqlite::memory:", SECRET)
            .unwrap()
            .with_admin("root1", "Adm1nPass");
        seed(&manager(users), &config).await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_rejects_weak_admin_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_login().returning(|_| Ok(None));
        users.expect_insert().never();

        let config = Config::new("sqlite::memory:", SECRET)
            .unwrap()
            .with_admin("root1", "weak");
        let result = seed(&manager(users), &config).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_seed_without_password_only_creates_roles() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_login().returning(|_| Ok(None));
        users.expect_insert().never();

        let config = Config::new("sqlite::memory:", SECRET).unwrap();
        seed(&manager(users), &config).await.unwrap();
    }
}
