//! Found-item intake.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use lostfound_common::{AppError, AppResult, photo_key};
use lostfound_db::{
    entities::{Category, QuestionAnswer, claim, found_item},
    repositories::{ClaimRepository, FoundItemRepository},
};
use sea_orm::Set;
use tracing::{info, warn};

use super::{
    PhotoStorage,
    identity::Principal,
    question_template::{DraftQuestion, QuestionSet},
};

/// An uploaded photo.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Input for reporting a found item.
#[derive(Debug, Clone)]
pub struct ReportFoundItemInput {
    pub category: Category,
    pub name: Option<String>,
    pub location: Option<String>,
    pub found_date: Option<NaiveDate>,
    pub photo: Option<PhotoUpload>,
    /// Finder-supplied questions; the category template is used when absent.
    pub questions: Option<Vec<QuestionAnswer>>,
}

/// A found item with the claims made on it.
#[derive(Debug, Clone)]
pub struct FoundItemWithClaims {
    pub item: found_item::Model,
    pub claims: Vec<claim::Model>,
}

/// Found-item service.
#[derive(Clone)]
pub struct FoundItemService {
    found_item_repo: FoundItemRepository,
    claim_repo: ClaimRepository,
    photos: PhotoStorage,
}

impl FoundItemService {
    /// Create a new found-item service.
    #[must_use]
    pub const fn new(
        found_item_repo: FoundItemRepository,
        claim_repo: ClaimRepository,
        photos: PhotoStorage,
    ) -> Self {
        Self {
            found_item_repo,
            claim_repo,
            photos,
        }
    }

    /// The questions a finder answers for a category.
    #[must_use]
    pub fn questions_for(category: Category) -> Vec<DraftQuestion> {
        QuestionSet::for_category(category).into_drafts()
    }

    /// Record a found item.
    pub async fn report(
        &self,
        principal: &Principal,
        input: ReportFoundItemInput,
    ) -> AppResult<found_item::Model> {
        let answers = match input.questions {
            Some(questions) if !questions.is_empty() => {
                check_questions(&questions)?;
                questions
            }
            _ => QuestionSet::for_category(input.category).into_unanswered(),
        };
        let answers =
            serde_json::to_value(&answers).map_err(|e| AppError::Internal(e.to_string()))?;

        let photo = match input.photo {
            Some(photo) if !photo.data.is_empty() => {
                let key = photo_key(principal.id(), &photo.file_name);
                Some(
                    self.photos
                        .put(&key, &photo.data, &photo.content_type)
                        .await?,
                )
            }
            _ => None,
        };

        let model = found_item::ActiveModel {
            id: Set(crate::generate_id()),
            reporter_id: Set(principal.id().to_string()),
            reporter_email: Set(principal.email().to_string()),
            reporter_contact: Set(principal.contact_number().map(ToString::to_string)),
            category: Set(input.category),
            name: Set(input.name.map(|s| s.trim().to_string()).unwrap_or_default()),
            photo_url: Set(photo.as_ref().map(|p| p.url.clone())),
            location: Set(input
                .location
                .map(|s| s.trim().to_string())
                .unwrap_or_default()),
            found_date: Set(input.found_date),
            answers: Set(answers),
            created_at: Set(Utc::now().into()),
        };

        match self.found_item_repo.create(model).await {
            Ok(item) => {
                info!(
                    found_item_id = %item.id,
                    reporter_id = %item.reporter_id,
                    category = %item.category,
                    "Found item reported"
                );
                Ok(item)
            }
            Err(e) => {
                if let Some(photo) = photo {
                    if let Err(cleanup) = self.photos.remove(&photo.key).await {
                        warn!(key = %photo.key, error = %cleanup, "Failed to remove orphaned photo");
                    }
                }
                Err(e)
            }
        }
    }

    /// The caller's found reports with their claims, newest first.
    pub async fn list_mine(&self, principal: &Principal) -> AppResult<Vec<FoundItemWithClaims>> {
        let items = self.found_item_repo.find_by_reporter(principal.id()).await?;
        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        let claims = self.claim_repo.find_by_found_items(&ids).await?;

        let mut by_item: HashMap<String, Vec<claim::Model>> = HashMap::new();
        for claim in claims {
            by_item
                .entry(claim.found_item_id.clone())
                .or_default()
                .push(claim);
        }

        Ok(items
            .into_iter()
            .map(|item| FoundItemWithClaims {
                claims: by_item.remove(&item.id).unwrap_or_default(),
                item,
            })
            .collect())
    }
}

fn check_questions(questions: &[QuestionAnswer]) -> AppResult<()> {
    for (i, q) in questions.iter().enumerate() {
        let n = i + 1;
        if q.question.trim().is_empty() {
            return Err(AppError::BadRequest(format!("question {n} is empty")));
        }
        if q.options.is_empty() {
            return Err(AppError::BadRequest(format!("question {n} has no options")));
        }
        if !q.answer.is_empty() && !q.options.contains(&q.answer) {
            return Err(AppError::BadRequest(format!(
                "question {n}: answer is not one of the options"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lostfound_common::NoOpPhotoStore;
    use lostfound_db::entities::{ClaimStatus, user};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn finder() -> Principal {
        Principal::new(user::Model {
            id: "finder1".to_string(),
            email: "finder1@student.uinsgd.ac.id".to_string(),
            name: None,
            photo_url: None,
            contact_number: Some("081234567890".to_string()),
            created_at: Utc::now().into(),
            updated_at: None,
        })
    }

    fn create_test_item(id: &str, answers: serde_json::Value) -> found_item::Model {
        found_item::Model {
            id: id.to_string(),
            reporter_id: "finder1".to_string(),
            reporter_email: "finder1@student.uinsgd.ac.id".to_string(),
            reporter_contact: Some("081234567890".to_string()),
            category: Category::Dompet,
            name: "Black wallet".to_string(),
            photo_url: None,
            location: "Library".to_string(),
            found_date: NaiveDate::from_ymd_opt(2024, 11, 10),
            answers,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_claim(id: &str, found_item_id: &str) -> claim::Model {
        claim::Model {
            id: id.to_string(),
            found_item_id: found_item_id.to_string(),
            claimant_id: "owner1".to_string(),
            score: 100.0,
            status: ClaimStatus::Approved,
            contact_number: "089876543210".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: MockDatabase) -> FoundItemService {
        let db = Arc::new(db.into_connection());
        FoundItemService::new(
            FoundItemRepository::new(db.clone()),
            ClaimRepository::new(db),
            Arc::new(NoOpPhotoStore::new("/files".to_string())),
        )
    }

    #[tokio::test]
    async fn test_report_with_template_questions() {
        let stored = create_test_item("f1", json!([]));
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[stored]]),
        );

        let item = service
            .report(
                &finder(),
                ReportFoundItemInput {
                    category: Category::Dompet,
                    name: Some("Black wallet".to_string()),
                    location: Some("Library".to_string()),
                    found_date: NaiveDate::from_ymd_opt(2024, 11, 10),
                    photo: Some(PhotoUpload {
                        file_name: "wallet.jpg".to_string(),
                        content_type: "image/jpeg".to_string(),
                        data: vec![1, 2, 3],
                    }),
                    questions: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(item.id, "f1");
    }

    #[tokio::test]
    async fn test_report_rejects_answer_outside_options() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));

        let result = service
            .report(
                &finder(),
                ReportFoundItemInput {
                    category: Category::Lainnya,
                    name: None,
                    location: None,
                    found_date: None,
                    photo: None,
                    questions: Some(vec![QuestionAnswer {
                        question: "Colour?".to_string(),
                        answer: "Purple".to_string(),
                        options: vec!["Black".to_string(), "Brown".to_string()],
                    }]),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_report_write_failure_is_an_error() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("insert failed".to_string())]),
        );

        let result = service
            .report(
                &finder(),
                ReportFoundItemInput {
                    category: Category::Kunci,
                    name: None,
                    location: None,
                    found_date: None,
                    photo: None,
                    questions: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_list_mine_groups_claims() {
        let f1 = create_test_item("f1", json!([]));
        let f2 = create_test_item("f2", json!([]));
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[f1, f2]])
                .append_query_results([[
                    create_test_claim("c1", "f2"),
                    create_test_claim("c2", "f2"),
                ]]),
        );

        let items = service.list_mine(&finder()).await.unwrap();

        assert_eq!(items.len(), 2);
        assert!(items[0].claims.is_empty());
        assert_eq!(items[1].claims.len(), 2);
        assert_eq!(items[1].claims[0].id, "c1");
    }

    #[test]
    fn test_questions_for_lainnya_are_placeholders() {
        let questions = FoundItemService::questions_for(Category::Lainnya);
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.options.len() == 3));
    }
}
