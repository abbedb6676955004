//! Found item repository.

use std::sync::Arc;

use crate::entities::{Category, FoundItem, found_item};
use chrono::NaiveDate;
use lostfound_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Found item repository for database operations.
#[derive(Clone)]
pub struct FoundItemRepository {
    db: Arc<DatabaseConnection>,
}

impl FoundItemRepository {
    /// Create a new found item repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new found item report.
    pub async fn create(&self, model: found_item::ActiveModel) -> AppResult<found_item::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<found_item::Model>> {
        FoundItem::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a report by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<found_item::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::FoundItemNotFound(id.to_string()))
    }

    /// Reports filed by a finder, newest first.
    pub async fn find_by_reporter(&self, reporter_id: &str) -> AppResult<Vec<found_item::Model>> {
        FoundItem::find()
            .filter(found_item::Column::ReporterId.eq(reporter_id))
            .order_by_desc(found_item::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Reports of `category` found between `start` and `end`, both inclusive.
    pub async fn find_in_window(
        &self,
        category: Category,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<found_item::Model>> {
        FoundItem::find()
            .filter(found_item::Column::Category.eq(category))
            .filter(found_item::Column::FoundDate.between(start, end))
            .order_by_asc(found_item::Column::FoundDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch several reports at once.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<found_item::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        FoundItem::find()
            .filter(found_item::Column::Id.is_in(ids.iter().cloned()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn create_test_found_item(id: &str, date: &str) -> found_item::Model {
        found_item::Model {
            id: id.to_string(),
            reporter_id: "finder1".to_string(),
            reporter_email: "finder1@student.uinsgd.ac.id".to_string(),
            reporter_contact: Some("081111111111".to_string()),
            category: Category::Hp,
            name: "Phone".to_string(),
            photo_url: None,
            location: "Canteen".to_string(),
            found_date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()),
            answers: json!([]),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<found_item::Model>::new()])
                .into_connection(),
        );

        let repo = FoundItemRepository::new(db);
        let result = repo.get_by_id("missing").await;

        match result {
            Err(AppError::FoundItemNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected FoundItemNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_in_window_returns_rows() {
        let a = create_test_found_item("f1", "2024-11-05");
        let b = create_test_found_item("f2", "2024-11-12");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[a, b]])
                .into_connection(),
        );

        let repo = FoundItemRepository::new(db);
        let start = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 11, 17).unwrap();
        let items = repo.find_in_window(Category::Hp, start, end).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "f1");
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_skips_query() {
        // No query results are queued: a query would fail.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = FoundItemRepository::new(db);
        let items = repo.find_by_ids(&[]).await.unwrap();

        assert!(items.is_empty());
    }
}
