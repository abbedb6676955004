//! Claim repository.

use std::sync::Arc;

use crate::entities::{Claim, ClaimStatus, claim};
use lostfound_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Claim repository for database operations.
#[derive(Clone)]
pub struct ClaimRepository {
    db: Arc<DatabaseConnection>,
}

impl ClaimRepository {
    /// Create a new claim repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append a claim.
    pub async fn create(&self, model: claim::ActiveModel) -> AppResult<claim::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a claim by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<claim::Model> {
        Claim::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::ClaimNotFound(id.to_string()))
    }

    /// The claimant's claim on a report, in any status.
    pub async fn find_by_claimant_and_item(
        &self,
        claimant_id: &str,
        found_item_id: &str,
    ) -> AppResult<Option<claim::Model>> {
        Claim::find()
            .filter(claim::Column::ClaimantId.eq(claimant_id))
            .filter(claim::Column::FoundItemId.eq(found_item_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All claims made by a user, newest first.
    pub async fn find_by_claimant(&self, claimant_id: &str) -> AppResult<Vec<claim::Model>> {
        Claim::find()
            .filter(claim::Column::ClaimantId.eq(claimant_id))
            .order_by_desc(claim::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The claimant's claims restricted to the given reports.
    pub async fn find_by_claimant_in(
        &self,
        claimant_id: &str,
        found_item_ids: &[String],
    ) -> AppResult<Vec<claim::Model>> {
        if found_item_ids.is_empty() {
            return Ok(vec![]);
        }
        Claim::find()
            .filter(claim::Column::ClaimantId.eq(claimant_id))
            .filter(claim::Column::FoundItemId.is_in(found_item_ids.iter().cloned()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All claims on the given reports, oldest first.
    pub async fn find_by_found_items(
        &self,
        found_item_ids: &[String],
    ) -> AppResult<Vec<claim::Model>> {
        if found_item_ids.is_empty() {
            return Ok(vec![]);
        }
        Claim::find()
            .filter(claim::Column::FoundItemId.is_in(found_item_ids.iter().cloned()))
            .order_by_asc(claim::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Change a claim's status.
    pub async fn update_status(
        &self,
        claim: claim::Model,
        status: ClaimStatus,
    ) -> AppResult<claim::Model> {
        let mut active: claim::ActiveModel = claim.into();
        active.status = Set(status);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
