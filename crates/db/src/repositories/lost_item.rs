//! Lost item repository.

use std::sync::Arc;

use crate::entities::{LostItem, lost_item};
use lostfound_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Lost item repository for database operations.
#[derive(Clone)]
pub struct LostItemRepository {
    db: Arc<DatabaseConnection>,
}

impl LostItemRepository {
    /// Create a new lost item repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new lost item report.
    pub async fn create(&self, model: lost_item::ActiveModel) -> AppResult<lost_item::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's reports, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<lost_item::Model>> {
        LostItem::find()
            .filter(lost_item::Column::UserId.eq(user_id))
            .order_by_desc(lost_item::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether the user has filed at least one report.
    pub async fn exists_for_user(&self, user_id: &str) -> AppResult<bool> {
        let first = LostItem::find()
            .filter(lost_item::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(first.is_some())
    }

    /// Delete a report owned by `user_id`. Returns whether a row was removed.
    pub async fn delete_owned(&self, id: &str, user_id: &str) -> AppResult<bool> {
        let result = LostItem::delete_many()
            .filter(lost_item::Column::Id.eq(id))
            .filter(lost_item::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::Category;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_lost_item(id: &str, user_id: &str) -> lost_item::Model {
        lost_item::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            user_email: format!("{user_id}@student.uinsgd.ac.id"),
            category: Category::Dompet,
            name: "Brown wallet".to_string(),
            location: "Mosque".to_string(),
            lost_date: NaiveDate::from_ymd_opt(2024, 11, 10).unwrap(),
            description: "Leather, has a student card inside".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create() {
        let item = create_test_lost_item("lost1", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[item.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = LostItemRepository::new(db);
        let active = lost_item::ActiveModel {
            id: Set("lost1".to_string()),
            user_id: Set("user1".to_string()),
            ..Default::default()
        };
        let created = repo.create(active).await.unwrap();

        assert_eq!(created.id, "lost1");
        assert_eq!(created.category, Category::Dompet);
    }

    #[tokio::test]
    async fn test_exists_for_user() {
        let item = create_test_lost_item("lost1", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[item]])
                .append_query_results([Vec::<lost_item::Model>::new()])
                .into_connection(),
        );

        let repo = LostItemRepository::new(db);

        assert!(repo.exists_for_user("user1").await.unwrap());
        assert!(!repo.exists_for_user("user2").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_owned_reports_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 0,
                    },
                ])
                .into_connection(),
        );

        let repo = LostItemRepository::new(db);

        assert!(repo.delete_owned("lost1", "user1").await.unwrap());
        assert!(!repo.delete_owned("lost1", "user1").await.unwrap());
    }
}
