//! Claim entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Claim status tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Quiz passed; the finder's contact is disclosed.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Finder confirmed the handover.
    #[sea_orm(string_value = "step2")]
    Step2,
    /// Finder rejected the claim after review.
    #[sea_orm(string_value = "declined")]
    Declined,
}

impl ClaimStatus {
    /// Active claims block further claims by the same claimant and
    /// disclose the finder's contact.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Approved | Self::Step2)
    }
}

/// A claimant's attempt to prove ownership of a found item.
///
/// Only passing attempts are stored.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "claim")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub found_item_id: String,

    #[sea_orm(indexed)]
    pub claimant_id: String,

    /// Quiz score, 0-100
    #[sea_orm(column_type = "Double")]
    pub score: f64,

    pub status: ClaimStatus,

    /// Claimant's contact number at the time of the claim
    pub contact_number: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::found_item::Entity",
        from = "Column::FoundItemId",
        to = "super::found_item::Column::Id",
        on_delete = "Cascade"
    )]
    FoundItem,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ClaimantId",
        to = "super::user::Column::Id"
    )]
    Claimant,
}

impl Related<super::found_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoundItem.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Claimant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
