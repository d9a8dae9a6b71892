//! User repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::role::Entity as RoleEntity;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::infra::error::{StorageError, StorageResult};
use domain::{User, UserProfile};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence operations on user accounts.
///
/// Every returned user carries its role, when it has one.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> StorageResult<Option<User>>;

    /// Exact, case-sensitive login lookup
    async fn find_by_login(&self, login: &str) -> StorageResult<Option<User>>;

    /// All users, ordered by id
    async fn list(&self) -> StorageResult<Vec<User>>;

    /// Insert a new account; a taken login is a [`StorageError::Conflict`]
    async fn insert(
        &self,
        login: String,
        password_hash: String,
        profile: UserProfile,
    ) -> StorageResult<User>;

    /// Replace names and role; login and password are left alone
    async fn update_profile(&self, id: i32, profile: UserProfile) -> StorageResult<User>;

    async fn update_password(&self, id: i32, password_hash: String) -> StorageResult<()>;

    async fn delete(&self, id: i32) -> StorageResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, model: user::Model) -> StorageResult<User> {
        let role = match model.role_id {
            Some(role_id) => RoleEntity::find_by_id(role_id).one(&self.db).await?,
            None => None,
        };
        Ok(model.into_user(role))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> StorageResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .find_also_related(RoleEntity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(model, role)| model.into_user(role)))
    }

    async fn find_by_login(&self, login: &str) -> StorageResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .find_also_related(RoleEntity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(model, role)| model.into_user(role)))
    }

    async fn list(&self) -> StorageResult<Vec<User>> {
        let rows = UserEntity::find()
            .find_also_related(RoleEntity)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, role)| model.into_user(role))
            .collect())
    }

    async fn insert(
        &self,
        login: String,
        password_hash: String,
        profile: UserProfile,
    ) -> StorageResult<User> {
        let active_model = ActiveModel {
            login: Set(login),
            password_hash: Set(password_hash),
            last_name: Set(profile.last_name),
            first_name: Set(profile.first_name),
            patronymic: Set(profile.patronymic),
            role_id: Set(profile.role_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        self.load(model).await
    }

    async fn update_profile(&self, id: i32, profile: UserProfile) -> StorageResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StorageError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.last_name = Set(profile.last_name);
        active.first_name = Set(profile.first_name);
        active.patronymic = Set(profile.patronymic);
        active.role_id = Set(profile.role_id);

        let model = active.update(&self.db).await?;
        self.load(model).await
    }

    async fn update_password(&self, id: i32, password_hash: String) -> StorageResult<()> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StorageError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.password_hash = Set(password_hash);
        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> StorageResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{RoleRepository, RoleStore};
    use crate::infra::Database;

    async fn store() -> (UserStore, RoleStore) {
        let database = Database::open("sqlite::memory:").await.unwrap();
        database.run_migrations().await.unwrap();
        (
            UserStore::new(database.get_connection()),
            RoleStore::new(database.get_connection()),
        )
    }

    fn profile(last: &str, first: &str, role_id: Option<i32>) -> UserProfile {
        UserProfile {
            last_name: Some(last.to_string()),
            first_name: Some(first.to_string()),
            patronymic: None,
            role_id,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_with_role() {
        let (users, roles) = store().await;
        let admin = roles.insert("admin", Some("Администраторы".into())).await.unwrap();

        let created = users
            .insert("admin".into(), "hash".into(), profile("Adminov", "Admin", Some(admin.id)))
            .await
            .unwrap();
        assert_eq!(created.role.as_ref().map(|r| r.name.as_str()), Some("admin"));

        let found = users.find_by_login("admin").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(found.is_admin());
        assert!(users.find_by_login("Admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_login_is_conflict() {
        let (users, _) = store().await;
        users
            .insert("user01".into(), "hash".into(), profile("A", "B", None))
            .await
            .unwrap();

        let err = users
            .insert("user01".into(), "hash".into(), profile("C", "D", None))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_role_is_rejected() {
        let (users, _) = store().await;
        let result = users
            .insert("user01".into(), "hash".into(), profile("A", "B", Some(42)))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_profile_keeps_credentials() {
        let (users, _) = store().await;
        let created = users
            .insert("user01".into(), "hash".into(), profile("Old", "Name", None))
            .await
            .unwrap();

        let updated = users
            .update_profile(created.id, profile("New", "Name", None))
            .await
            .unwrap();
        assert_eq!(updated.last_name.as_deref(), Some("New"));
        assert_eq!(updated.login, "user01");
        assert_eq!(updated.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_update_password() {
        let (users, _) = store().await;
        let created = users
            .insert("user01".into(), "old".into(), profile("A", "B", None))
            .await
            .unwrap();

        users.update_password(created.id, "new".into()).await.unwrap();
        let found = users.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.password_hash, "new");
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_delete_removes() {
        let (users, _) = store().await;
        for login in ["first1", "second2", "third3"] {
            users
                .insert(login.into(), "hash".into(), profile("A", "B", None))
                .await
                .unwrap();
        }

        let listed = users.list().await.unwrap();
        let logins: Vec<_> = listed.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, vec!["first1", "second2", "third3"]);

        users.delete(listed[1].id).await.unwrap();
        assert_eq!(users.list().await.unwrap().len(), 2);
        assert!(matches!(
            users.delete(listed[1].id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_missing_user_updates_are_not_found() {
        let (users, _) = store().await;
        assert!(matches!(
            users.update_profile(7, UserProfile::default()).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            users.update_password(7, "x".into()).await,
            Err(StorageError::NotFound)
        ));
    }
}
