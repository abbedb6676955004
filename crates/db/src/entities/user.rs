//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A signed-in campus user.
///
/// Rows are created the first time the identity provider vouches for a new
/// subject; the id is the provider's `sub` claim.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub email: String,

    /// Display name from the identity provider
    #[sea_orm(nullable)]
    pub name: Option<String>,

    #[sea_orm(nullable)]
    pub photo_url: Option<String>,

    /// WhatsApp contact number, collected once
    #[sea_orm(nullable)]
    pub contact_number: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Whether a contact number is on file.
    #[must_use]
    pub fn has_contact_number(&self) -> bool {
        self.contact_number
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lost_item::Entity")]
    LostItems,
    #[sea_orm(has_many = "super::found_item::Entity")]
    FoundItems,
    #[sea_orm(has_many = "super::claim::Entity")]
    Claims,
}

impl Related<super::lost_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LostItems.def()
    }
}

impl Related<super::found_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoundItems.def()
    }
}

impl Related<super::claim::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Claims.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
