//! Role repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::role::{self, ActiveModel, Entity as RoleEntity};
use crate::infra::error::StorageResult;
use domain::Role;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// All roles, ordered by id
    async fn list(&self) -> StorageResult<Vec<Role>>;

    async fn find_by_id(&self, id: i32) -> StorageResult<Option<Role>>;

    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Role>>;

    async fn insert(&self, name: &str, description: Option<String>) -> StorageResult<Role>;
}

pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn list(&self) -> StorageResult<Vec<Role>> {
        let models = RoleEntity::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Role::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> StorageResult<Option<Role>> {
        let result = RoleEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Role::from))
    }

    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Role>> {
        let result = RoleEntity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(result.map(Role::from))
    }

    async fn insert(&self, name: &str, description: Option<String>) -> StorageResult<Role> {
        let active_model = ActiveModel {
            name: Set(name.to_string()),
            description: Set(description),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Role::from(model))
    }
}
