//! Found item report entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Category;

/// One verification question as recorded by the finder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    /// The option the finder marked as true. Empty when none was chosen.
    #[serde(default)]
    pub answer: String,
    pub options: Vec<String>,
}

/// A report of an item someone found and is holding for return.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "found_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Finder
    #[sea_orm(indexed)]
    pub reporter_id: String,

    pub reporter_email: String,

    /// Finder's contact number at the time of the report
    #[sea_orm(nullable)]
    pub reporter_contact: Option<String>,

    pub category: Category,

    pub name: String,

    #[sea_orm(nullable)]
    pub photo_url: Option<String>,

    pub location: String,

    /// Reports without a date never match a search
    #[sea_orm(nullable)]
    pub found_date: Option<Date>,

    /// Ordered answer key (JSON array of `QuestionAnswer`)
    #[sea_orm(column_type = "JsonBinary")]
    pub answers: Json,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Decode the ordered answer key.
    pub fn answer_key(&self) -> Result<Vec<QuestionAnswer>, serde_json::Error> {
        serde_json::from_value(self.answers.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReporterId",
        to = "super::user::Column::Id"
    )]
    Reporter,
    #[sea_orm(has_many = "super::claim::Entity")]
    Claims,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reporter.def()
    }
}

impl Related<super::claim::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Claims.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
