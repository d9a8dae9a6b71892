//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Role, User};

use super::role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub login: String,
    pub password_hash: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub patronymic: Option<String>,
    pub role_id: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_delete = "SetNull"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity, attaching the role loaded with it.
    pub fn into_user(self, role: Option<role::Model>) -> User {
        User {
            id: self.id,
            login: self.login,
            password_hash: self.password_hash,
            last_name: self.last_name,
            first_name: self.first_name,
            patronymic: self.patronymic,
            role_id: self.role_id,
            role: role.map(Role::from),
            created_at: self.created_at,
        }
    }
}
