//! Claim endpoints.

use axum::{Json, Router, extract::State, routing::post};
use lostfound_common::{AppError, AppResult};
use lostfound_core::{ClaimHistoryEntry, ClaimOutcome, Quiz, SubmitClaimInput};
use lostfound_db::entities::{ClaimStatus, claim};
use serde::{Deserialize, Serialize};

use crate::{extractors::RegisteredUser, middleware::AppState, response::ApiResponse};

/// Quiz request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub found_item_id: String,
}

/// Review request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub claim_id: String,
    pub status: ClaimStatus,
}

/// Claim response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub found_item_id: String,
    pub claimant_id: String,
    pub score: f64,
    pub status: ClaimStatus,
}

impl From<claim::Model> for ClaimResponse {
    fn from(c: claim::Model) -> Self {
        Self {
            id: c.id,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.map(|t| t.to_rfc3339()),
            found_item_id: c.found_item_id,
            claimant_id: c.claimant_id,
            score: c.score,
            status: c.status,
        }
    }
}

/// Claim attempt response.
#[derive(Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum ClaimOutcomeResponse {
    #[serde(rename_all = "camelCase")]
    Approved {
        claim: ClaimResponse,
        finder_contact: Option<String>,
        whatsapp_link: Option<String>,
    },
    Rejected { score: f64 },
}

impl From<ClaimOutcome> for ClaimOutcomeResponse {
    fn from(outcome: ClaimOutcome) -> Self {
        match outcome {
            ClaimOutcome::Approved {
                claim,
                finder_contact,
                whatsapp_link,
            } => Self::Approved {
                claim: claim.into(),
                finder_contact,
                whatsapp_link,
            },
            ClaimOutcome::Rejected { score } => Self::Rejected { score },
        }
    }
}

/// Claim history row.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimHistoryResponse {
    #[serde(flatten)]
    pub claim: ClaimResponse,
    pub item_name: Option<String>,
    pub item_location: Option<String>,
    pub item_found_date: Option<String>,
    pub item_photo_url: Option<String>,
    pub finder_contact: Option<String>,
    pub whatsapp_link: Option<String>,
}

impl From<ClaimHistoryEntry> for ClaimHistoryResponse {
    fn from(e: ClaimHistoryEntry) -> Self {
        Self {
            claim: e.claim.into(),
            item_name: e.item_name,
            item_location: e.item_location,
            item_found_date: e.item_found_date.map(|d| d.to_string()),
            item_photo_url: e.item_photo_url,
            finder_contact: e.finder_contact,
            whatsapp_link: e.whatsapp_link,
        }
    }
}

async fn quiz(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
    Json(req): Json<QuizRequest>,
) -> AppResult<ApiResponse<Quiz>> {
    let quiz = state
        .claim_service
        .quiz(&principal, &req.found_item_id)
        .await?;
    Ok(ApiResponse::ok(quiz))
}

async fn submit(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
    Json(req): Json<SubmitClaimInput>,
) -> AppResult<ApiResponse<ClaimOutcomeResponse>> {
    let outcome = state.claim_service.submit(&principal, req).await?;
    Ok(ApiResponse::ok(outcome.into()))
}

async fn review(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<ClaimResponse>> {
    if req.status == ClaimStatus::Approved {
        return Err(AppError::BadRequest(
            "status must be step2 or declined".to_string(),
        ));
    }

    let claim = state
        .claim_service
        .review(&principal, &req.claim_id, req.status)
        .await?;

    Ok(ApiResponse::ok(claim.into()))
}

async fn history(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ClaimHistoryResponse>>> {
    let history = state.claim_service.history(&principal).await?;
    Ok(ApiResponse::ok(history.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quiz", post(quiz))
        .route("/submit", post(submit))
        .route("/review", post(review))
        .route("/history", post(history))
}
