//! Claim verification and history.
//!
//! A claimant answers the finder's questions for a found item. The answers
//! are scored against the finder's key; a score of at least
//! [`APPROVAL_THRESHOLD`] records an approved claim and releases the
//! finder's contact number. Failed attempts are not recorded. A user holds at
//! most one claim per found item, so a declined claim is final.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use lostfound_common::{AppError, AppResult};
use lostfound_db::{
    entities::{Category, ClaimStatus, QuestionAnswer, claim, found_item},
    repositories::{ClaimRepository, FoundItemRepository, LostItemRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::identity::{Principal, whatsapp_link};

/// Minimum score, in percent, for a claim to be approved.
pub const APPROVAL_THRESHOLD: f64 = 80.0;

/// Percentage of questions answered exactly as the finder did.
///
/// Selections are matched to questions by position. Missing or empty
/// selections count as wrong and extra selections are ignored. A report
/// without questions scores zero.
#[must_use]
pub fn score_answers(key: &[QuestionAnswer], selected: &[String]) -> f64 {
    if key.is_empty() {
        return 0.0;
    }

    let correct = key
        .iter()
        .zip(selected)
        .filter(|(q, s)| !s.is_empty() && **s == q.answer)
        .count();

    correct as f64 * 100.0 / key.len() as f64
}

/// Whether a score clears [`APPROVAL_THRESHOLD`].
#[must_use]
pub fn is_passing(score: f64) -> bool {
    score >= APPROVAL_THRESHOLD
}

/// A question as shown to a claimant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
}

/// The quiz for one found item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub found_item_id: String,
    pub category: Category,
    pub name: String,
    pub photo_url: Option<String>,
    pub questions: Vec<QuizQuestion>,
}

/// A claimant's answers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitClaimInput {
    pub found_item_id: String,
    pub answers: Vec<String>,
    /// The claimant's lost report to retire on approval.
    #[serde(default)]
    pub lost_item_id: Option<String>,
}

/// Result of a claim attempt.
#[derive(Debug, Clone)]
pub enum ClaimOutcome {
    Approved {
        claim: claim::Model,
        finder_contact: Option<String>,
        whatsapp_link: Option<String>,
    },
    Rejected {
        score: f64,
    },
}

impl ClaimOutcome {
    #[must_use]
    pub fn score(&self) -> f64 {
        match self {
            Self::Approved { claim, .. } => claim.score,
            Self::Rejected { score } => *score,
        }
    }

    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }
}

/// One row of a claimant's history.
#[derive(Debug, Clone)]
pub struct ClaimHistoryEntry {
    pub claim: claim::Model,
    pub item_name: Option<String>,
    pub item_location: Option<String>,
    pub item_found_date: Option<NaiveDate>,
    pub item_photo_url: Option<String>,
    /// Only present while the claim is active.
    pub finder_contact: Option<String>,
    pub whatsapp_link: Option<String>,
}

/// Join claims with their found items, keeping the claims' order.
#[must_use]
pub fn build_history(
    claims: Vec<claim::Model>,
    items: Vec<found_item::Model>,
) -> Vec<ClaimHistoryEntry> {
    let items: HashMap<String, found_item::Model> =
        items.into_iter().map(|i| (i.id.clone(), i)).collect();

    claims
        .into_iter()
        .map(|claim| {
            let item = items.get(&claim.found_item_id);
            let finder_contact = item
                .filter(|_| claim.status.is_active())
                .and_then(|i| i.reporter_contact.clone());
            let link = finder_contact.as_deref().and_then(whatsapp_link);

            ClaimHistoryEntry {
                item_name: item.map(|i| i.name.clone()),
                item_location: item.map(|i| i.location.clone()),
                item_found_date: item.and_then(|i| i.found_date),
                item_photo_url: item.and_then(|i| i.photo_url.clone()),
                finder_contact,
                whatsapp_link: link,
                claim,
            }
        })
        .collect()
}

/// Claim service.
#[derive(Clone)]
pub struct ClaimService {
    found_item_repo: FoundItemRepository,
    claim_repo: ClaimRepository,
    lost_item_repo: LostItemRepository,
}

impl ClaimService {
    /// Create a new claim service.
    #[must_use]
    pub const fn new(
        found_item_repo: FoundItemRepository,
        claim_repo: ClaimRepository,
        lost_item_repo: LostItemRepository,
    ) -> Self {
        Self {
            found_item_repo,
            claim_repo,
            lost_item_repo,
        }
    }

    /// The questions for a found item, without the answers.
    ///
    /// Only callers with a lost report may take a quiz.
    pub async fn quiz(&self, principal: &Principal, found_item_id: &str) -> AppResult<Quiz> {
        self.require_lost_report(principal).await?;
        let item = self.found_item_repo.get_by_id(found_item_id).await?;
        let key = answer_key(&item)?;

        Ok(Quiz {
            found_item_id: item.id,
            category: item.category,
            name: item.name,
            photo_url: item.photo_url,
            questions: key
                .into_iter()
                .map(|q| QuizQuestion {
                    question: q.question,
                    options: q.options,
                })
                .collect(),
        })
    }

    /// Score the caller's answers and record an approved claim if they pass.
    pub async fn submit(
        &self,
        principal: &Principal,
        input: SubmitClaimInput,
    ) -> AppResult<ClaimOutcome> {
        let contact_number = principal.require_contact_number()?.to_string();
        self.require_lost_report(principal).await?;
        let item = self.found_item_repo.get_by_id(&input.found_item_id).await?;

        if item.reporter_id == principal.id() {
            return Err(AppError::BadRequest(
                "You cannot claim an item you reported".to_string(),
            ));
        }

        if self
            .claim_repo
            .find_by_claimant_and_item(principal.id(), &item.id)
            .await?
            .is_some()
        {
            return Err(already_claimed());
        }

        let key = answer_key(&item)?;
        let score = score_answers(&key, &input.answers);

        if !is_passing(score) {
            info!(
                found_item_id = %item.id,
                claimant_id = %principal.id(),
                score,
                "Claim rejected"
            );
            return Ok(ClaimOutcome::Rejected { score });
        }

        let model = claim::ActiveModel {
            id: Set(crate::generate_id()),
            found_item_id: Set(item.id.clone()),
            claimant_id: Set(principal.id().to_string()),
            score: Set(score),
            status: Set(ClaimStatus::Approved),
            contact_number: Set(contact_number),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };
        let claim = match self.claim_repo.create(model).await {
            Ok(claim) => claim,
            // A concurrent submission that won the unique index leaves its row behind.
            Err(e) => {
                if self
                    .claim_repo
                    .find_by_claimant_and_item(principal.id(), &item.id)
                    .await?
                    .is_some()
                {
                    return Err(already_claimed());
                }
                return Err(e);
            }
        };

        info!(
            claim_id = %claim.id,
            found_item_id = %item.id,
            claimant_id = %principal.id(),
            score,
            "Claim approved"
        );

        if let Some(lost_item_id) = input.lost_item_id.as_deref() {
            if let Err(e) = self
                .lost_item_repo
                .delete_owned(lost_item_id, principal.id())
                .await
            {
                warn!(lost_item_id = %lost_item_id, error = %e, "Failed to retire lost report");
            }
        }

        let link = item.reporter_contact.as_deref().and_then(whatsapp_link);
        Ok(ClaimOutcome::Approved {
            claim,
            finder_contact: item.reporter_contact,
            whatsapp_link: link,
        })
    }

    /// Move an approved claim on the caller's report to `step2` or `declined`.
    pub async fn review(
        &self,
        principal: &Principal,
        claim_id: &str,
        status: ClaimStatus,
    ) -> AppResult<claim::Model> {
        let claim = self.claim_repo.get_by_id(claim_id).await?;
        let item = self.found_item_repo.get_by_id(&claim.found_item_id).await?;

        if item.reporter_id != principal.id() {
            return Err(AppError::Forbidden(
                "Only the finder can review this claim".to_string(),
            ));
        }

        if claim.status != ClaimStatus::Approved || status == ClaimStatus::Approved {
            return Err(AppError::BadRequest(format!(
                "Cannot move a claim from {:?} to {status:?}",
                claim.status
            )));
        }

        let claim = self.claim_repo.update_status(claim, status).await?;
        info!(claim_id = %claim.id, status = ?claim.status, "Claim reviewed");
        Ok(claim)
    }

    /// The caller's claims with item details, newest first.
    pub async fn history(&self, principal: &Principal) -> AppResult<Vec<ClaimHistoryEntry>> {
        let claims = self.claim_repo.find_by_claimant(principal.id()).await?;

        let ids: Vec<String> = {
            let mut seen = HashSet::new();
            claims
                .iter()
                .filter(|c| seen.insert(c.found_item_id.as_str()))
                .map(|c| c.found_item_id.clone())
                .collect()
        };
        let items = self.found_item_repo.find_by_ids(&ids).await?;

        Ok(build_history(claims, items))
    }

    async fn require_lost_report(&self, principal: &Principal) -> AppResult<()> {
        if self.lost_item_repo.exists_for_user(principal.id()).await? {
            Ok(())
        } else {
            Err(AppError::LostReportRequired)
        }
    }
}

fn already_claimed() -> AppError {
    AppError::Conflict("You have already claimed this item".to_string())
}

fn answer_key(item: &found_item::Model) -> AppResult<Vec<QuestionAnswer>> {
    item.answer_key().map_err(|e| {
        AppError::Internal(format!("Corrupt answer key on found item {}: {e}", item.id))
    })
}
