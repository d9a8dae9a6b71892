//! User service tests over the SeaORM stores and an in-memory SQLite database.

use std::sync::Arc;

use lab_portal::errors::AppError;
use lab_portal::infra::{Database, RoleStore, StorageError, UserStore};
use lab_portal::services::{UserManager, UserService};
use domain::{NewUser, Password, UserProfile, ROLE_ADMIN, ROLE_USER};

async fn service() -> UserManager<UserStore, RoleStore> {
    let db = Database::open("sqlite::memory:").await.unwrap();
    db.run_migrations().await.unwrap();

    UserManager::new(
        Arc::new(UserStore::new(db.get_connection())),
        Arc::new(RoleStore::new(db.get_connection())),
    )
}

fn new_user(login: &str, role_id: Option<i32>) -> NewUser {
    NewUser {
        login: login.to_string(),
        password: "StrongPass1".to_string(),
        profile: UserProfile {
            last_name: Some("Иванов".to_string()),
            first_name: Some("Иван".to_string()),
            patronymic: None,
            role_id,
        },
    }
}

#[tokio::test]
async fn test_ensure_default_roles_is_idempotent() {
    let service = service().await;

    let first = service.ensure_default_roles().await.unwrap();
    let second = service.ensure_default_roles().await.unwrap();

    assert_eq!(first, second);
    let names: Vec<_> = second.iter().map(|role| role.name.as_str()).collect();
    assert_eq!(names, vec![ROLE_ADMIN, ROLE_USER]);
}

#[tokio::test]
async fn test_create_user_stores_hash_and_loads_role() {
    let service = service().await;
    let roles = service.ensure_default_roles().await.unwrap();
    let admin = roles.iter().find(|role| role.is_admin()).unwrap();

    let created = service
        .create_user(new_user("ivanov1", Some(admin.id)))
        .await
        .unwrap();
    assert_ne!(created.password_hash, "StrongPass1");
    assert!(Password::from_hash(created.password_hash.clone()).verify("StrongPass1"));

    let loaded = service.get_user(created.id).await.unwrap();
    assert_eq!(loaded.full_name(), "Иванов Иван");
    assert!(loaded.is_admin());
}

#[tokio::test]
async fn test_duplicate_login_is_a_conflict() {
    let service = service().await;
    service.create_user(new_user("ivanov1", None)).await.unwrap();

    let result = service.create_user(new_user("ivanov1", None)).await;
    assert!(matches!(
        result,
        Err(AppError::Storage(StorageError::Conflict(_)))
    ));
}

#[tokio::test]
async fn test_unknown_role_is_rejected_by_storage() {
    let service = service().await;

    let result = service.create_user(new_user("ivanov1", Some(99))).await;
    assert!(matches!(result, Err(AppError::Storage(_))));
    assert!(service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_replaces_profile() {
    let service = service().await;
    let created = service.create_user(new_user("ivanov1", None)).await.unwrap();

    let updated = service
        .update_user(
            created.id,
            UserProfile {
                last_name: Some("Петров".to_string()),
                first_name: Some("Пётр".to_string()),
                patronymic: Some("Петрович".to_string()),
                role_id: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.login, "ivanov1");
    assert_eq!(updated.full_name(), "Петров Пётр Петрович");
}

#[tokio::test]
async fn test_list_is_ordered_and_delete_removes() {
    let service = service().await;
    let first = service.create_user(new_user("first1", None)).await.unwrap();
    let second = service.create_user(new_user("second2", None)).await.unwrap();

    let ids: Vec<_> = service
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|user| user.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);

    service.delete_user(first.id).await.unwrap();
    assert!(matches!(
        service.get_user(first.id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        service.delete_user(first.id).await,
        Err(AppError::NotFound)
    ));
    assert_eq!(
        service.find_by_login("second2").await.unwrap().map(|u| u.id),
        Some(second.id)
    );
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let service = service().await;

    let result = service.update_user(42, UserProfile::default()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}
