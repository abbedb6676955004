//! Lost-item intake.

use chrono::Utc;
use lostfound_common::AppResult;
use lostfound_db::{entities::lost_item, repositories::LostItemRepository};
use sea_orm::Set;
use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;

use super::identity::Principal;

/// Input for reporting a lost item. Every field is required.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportLostItemInput {
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, max = 256, message = "name must be 1-256 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 256, message = "location must be 1-256 characters"))]
    pub location: String,
    #[validate(length(min = 1, message = "lostDate is required"))]
    pub lost_date: String,
    #[validate(length(min = 1, max = 4000, message = "description must be 1-4000 characters"))]
    pub description: String,
}

impl ReportLostItemInput {
    fn trimmed(self) -> Self {
        Self {
            category: self.category.trim().to_string(),
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            lost_date: self.lost_date.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Lost-item service.
#[derive(Clone)]
pub struct LostItemService {
    lost_item_repo: LostItemRepository,
}

impl LostItemService {
    /// Create a new lost-item service.
    #[must_use]
    pub const fn new(lost_item_repo: LostItemRepository) -> Self {
        Self { lost_item_repo }
    }

    /// Record a lost item.
    pub async fn report(
        &self,
        principal: &Principal,
        input: ReportLostItemInput,
    ) -> AppResult<lost_item::Model> {
        let input = input.trimmed();
        input.validate()?;

        let category = crate::parse_category(&input.category)?;
        let lost_date = crate::parse_date(&input.lost_date, "lostDate")?;

        let model = lost_item::ActiveModel {
            id: Set(crate::generate_id()),
            user_id: Set(principal.id().to_string()),
            user_email: Set(principal.email().to_string()),
            category: Set(category),
            name: Set(input.name),
            location: Set(input.location),
            lost_date: Set(lost_date),
            description: Set(input.description),
            created_at: Set(Utc::now().into()),
        };

        let item = self.lost_item_repo.create(model).await?;
        info!(lost_item_id = %item.id, user_id = %item.user_id, "Lost item reported");
        Ok(item)
    }

    /// The caller's lost reports, newest first.
    pub async fn list_mine(&self, principal: &Principal) -> AppResult<Vec<lost_item::Model>> {
        self.lost_item_repo.find_by_user(principal.id()).await
    }

    /// Delete one of the caller's lost reports.
    ///
    /// Withdrawing a report that does not exist (or is not the caller's)
    /// succeeds without changing anything.
    pub async fn withdraw(&self, principal: &Principal, lost_item_id: &str) -> AppResult<()> {
        let removed = self
            .lost_item_repo
            .delete_owned(lost_item_id, principal.id())
            .await?;

        if removed {
            info!(lost_item_id = %lost_item_id, user_id = %principal.id(), "Lost report withdrawn");
        } else {
            debug!(lost_item_id = %lost_item_id, user_id = %principal.id(), "Nothing to withdraw");
        }
        Ok(())
    }

    /// Whether the caller has at least one lost report.
    pub async fn has_report(&self, principal: &Principal) -> AppResult<bool> {
        self.lost_item_repo.exists_for_user(principal.id()).await
    }
}
