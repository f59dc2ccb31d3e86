//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub nickname: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for storywave_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nickname: model.nickname,
            email: model.email,
            role: model.role.into(),
            created_at: model.created_at.into(),
        }
    }
}

impl From<storywave_core::domain::User> for ActiveModel {
    fn from(user: storywave_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            nickname: Set(user.nickname),
            email: Set(user.email),
            role: Set(user.role.into()),
            created_at: Set(user.created_at.into()),
        }
    }
}
