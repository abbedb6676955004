//! Lost item report entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Category;

/// A report of an item the owner has lost.
///
/// Having at least one of these is what unlocks search.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lost_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owner
    #[sea_orm(indexed)]
    pub user_id: String,

    pub user_email: String,

    pub category: Category,

    pub name: String,

    pub location: String,

    pub lost_date: Date,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
