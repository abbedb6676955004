//! Search for found items matching a lost item.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use lostfound_common::{AppError, AppResult};
use lostfound_db::{
    entities::{Category, found_item},
    repositories::{ClaimRepository, FoundItemRepository, LostItemRepository},
};
use serde::Serialize;
use tracing::debug;

use super::identity::Principal;

/// Days either side of the lost date that a found date may fall on.
pub const SEARCH_WINDOW_DAYS: i64 = 7;

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The window of `days` days either side of `date`.
    #[must_use]
    pub fn around(date: NaiveDate, days: i64) -> Self {
        let span = Duration::days(days);
        Self {
            start: date.checked_sub_signed(span).unwrap_or(NaiveDate::MIN),
            end: date.checked_add_signed(span).unwrap_or(NaiveDate::MAX),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A search hit. The answer key is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItemSummary {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub location: String,
    pub found_date: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub question_count: usize,
}

impl From<found_item::Model> for FoundItemSummary {
    fn from(item: found_item::Model) -> Self {
        let question_count = item.answers.as_array().map_or(0, Vec::len);
        Self {
            id: item.id,
            category: item.category,
            name: item.name,
            location: item.location,
            found_date: item.found_date,
            photo_url: item.photo_url,
            question_count,
        }
    }
}

/// Whether a found item is a candidate for a lost item.
#[must_use]
pub fn is_candidate(item: &found_item::Model, category: Category, window: &DateWindow) -> bool {
    item.category == category && item.found_date.is_some_and(|d| window.contains(d))
}

/// Search service.
#[derive(Clone)]
pub struct SearchService {
    lost_item_repo: LostItemRepository,
    found_item_repo: FoundItemRepository,
    claim_repo: ClaimRepository,
}

impl SearchService {
    /// Create a new search service.
    #[must_use]
    pub const fn new(
        lost_item_repo: LostItemRepository,
        found_item_repo: FoundItemRepository,
        claim_repo: ClaimRepository,
    ) -> Self {
        Self {
            lost_item_repo,
            found_item_repo,
            claim_repo,
        }
    }

    /// Found items of the same category found within a week of `lost_date`.
    ///
    /// Only callers with a lost report may search. Items the caller has
    /// already claimed, in any state, are left out.
    pub async fn search(
        &self,
        principal: &Principal,
        category: Category,
        lost_date: NaiveDate,
    ) -> AppResult<Vec<FoundItemSummary>> {
        if !self.lost_item_repo.exists_for_user(principal.id()).await? {
            return Err(AppError::LostReportRequired);
        }

        let window = DateWindow::around(lost_date, SEARCH_WINDOW_DAYS);
        let mut items = self
            .found_item_repo
            .find_in_window(category, window.start, window.end)
            .await?;
        items.retain(|item| is_candidate(item, category, &window));

        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        let claimed: HashSet<String> = self
            .claim_repo
            .find_by_claimant_in(principal.id(), &ids)
            .await?
            .into_iter()
            .map(|c| c.found_item_id)
            .collect();
        items.retain(|item| !claimed.contains(&item.id));

        debug!(
            user_id = %principal.id(),
            category = %category,
            hits = items.len(),
            "Search completed"
        );

        Ok(items.into_iter().map(FoundItemSummary::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lostfound_db::entities::{ClaimStatus, claim, lost_item, user};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn owner() -> Principal {
        Principal::new(user::Model {
            id: "owner1".to_string(),
            email: "owner1@student.uinsgd.ac.id".to_string(),
            name: None,
            photo_url: None,
            contact_number: Some("089876543210".to_string()),
            created_at: Utc::now().into(),
            updated_at: None,
        })
    }

    fn lost_report() -> lost_item::Model {
        lost_item::Model {
            id: "l1".to_string(),
            user_id: "owner1".to_string(),
            user_email: "owner1@student.uinsgd.ac.id".to_string(),
            category: Category::Hp,
            name: "Phone".to_string(),
            location: "Canteen".to_string(),
            lost_date: date(2024, 11, 10),
            description: "Blue case".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn found(id: &str, category: Category, found_date: Option<NaiveDate>) -> found_item::Model {
        found_item::Model {
            id: id.to_string(),
            reporter_id: "finder1".to_string(),
            reporter_email: "finder1@student.uinsgd.ac.id".to_string(),
            reporter_contact: Some("081234567890".to_string()),
            category,
            name: "Phone".to_string(),
            photo_url: None,
            location: "Library".to_string(),
            found_date,
            answers: json!([
                {"question": "Brand?", "answer": "Samsung", "options": ["Samsung", "Apple"]}
            ]),
            created_at: Utc::now().into(),
        }
    }

    fn claim_on(found_item_id: &str) -> claim::Model {
        claim::Model {
            id: "c1".to_string(),
            found_item_id: found_item_id.to_string(),
            claimant_id: "owner1".to_string(),
            score: 40.0,
            status: ClaimStatus::Declined,
            contact_number: "089876543210".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: MockDatabase) -> SearchService {
        let db = Arc::new(db.into_connection());
        SearchService::new(
            LostItemRepository::new(db.clone()),
            FoundItemRepository::new(db.clone()),
            ClaimRepository::new(db),
        )
    }

    #[test]
    fn test_window_is_inclusive_seven_days() {
        let window = DateWindow::around(date(2024, 11, 10), SEARCH_WINDOW_DAYS);
        assert_eq!(window.start, date(2024, 11, 3));
        assert_eq!(window.end, date(2024, 11, 17));
        assert!(window.contains(date(2024, 11, 3)));
        assert!(window.contains(date(2024, 11, 17)));
        assert!(!window.contains(date(2024, 11, 2)));
        assert!(!window.contains(date(2024, 11, 18)));
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let window = DateWindow::around(date(2024, 3, 2), SEARCH_WINDOW_DAYS);
        assert_eq!(window.start, date(2024, 2, 24));
        assert!(window.contains(date(2024, 2, 29)));
    }

    #[test]
    fn test_category_must_match_exactly() {
        let window = DateWindow::around(date(2024, 11, 10), SEARCH_WINDOW_DAYS);
        let item = found("f1", Category::Hp, Some(date(2024, 11, 12)));

        assert!(is_candidate(&item, Category::Hp, &window));
        assert!(!is_candidate(&item, Category::Laptop, &window));
        assert!("HP".parse::<Category>().is_err());
    }

    #[test]
    fn test_items_without_found_date_never_match() {
        let window = DateWindow::around(date(2024, 11, 10), SEARCH_WINDOW_DAYS);
        assert!(!is_candidate(&found("f1", Category::Hp, None), Category::Hp, &window));
    }

    #[tokio::test]
    async fn test_search_requires_lost_report() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<lost_item::Model>::new()]),
        );

        let result = service
            .search(&owner(), Category::Hp, date(2024, 11, 10))
            .await;
        assert!(matches!(result, Err(AppError::LostReportRequired)));
    }

    #[tokio::test]
    async fn test_search_filters_window_and_claimed() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[lost_report()]])
                .append_query_results([[
                    found("f1", Category::Hp, Some(date(2024, 11, 3))),
                    found("f2", Category::Hp, Some(date(2024, 11, 17))),
                    found("f3", Category::Hp, Some(date(2024, 11, 18))),
                    found("f4", Category::Hp, Some(date(2024, 11, 12))),
                ]])
                .append_query_results([[claim_on("f4")]]),
        );

        let hits = service
            .search(&owner(), Category::Hp, date(2024, 11, 10))
            .await
            .unwrap();

        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2"]);
        assert_eq!(hits[0].question_count, 1);
    }

    #[test]
    fn test_summary_has_no_answers() {
        let summary = FoundItemSummary::from(found("f1", Category::Hp, None));
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("answers").is_none());
        assert_eq!(value["questionCount"], 1);
        assert_eq!(value["category"], "Hp");
    }
}
