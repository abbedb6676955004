//! Found-item endpoints.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use lostfound_common::{AppError, AppResult};
use lostfound_core::{
    DraftQuestion, FoundItemService, FoundItemWithClaims, PhotoUpload, ReportFoundItemInput,
};
use lostfound_db::entities::{Category, QuestionAnswer, found_item};
use serde::{Deserialize, Serialize};

use crate::{extractors::RegisteredUser, middleware::AppState, response::ApiResponse};

/// Largest accepted upload, photo included.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ==================== Request/Response Types ====================

/// Found item response, answer key included. Only sent to the finder.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItemResponse {
    pub id: String,
    pub created_at: String,
    pub reporter_id: String,
    pub reporter_email: String,
    pub reporter_contact: Option<String>,
    pub category: Category,
    pub name: String,
    pub photo_url: Option<String>,
    pub location: String,
    pub found_date: Option<String>,
    pub answers: serde_json::Value,
}

impl From<found_item::Model> for FoundItemResponse {
    fn from(f: found_item::Model) -> Self {
        Self {
            id: f.id,
            created_at: f.created_at.to_rfc3339(),
            reporter_id: f.reporter_id,
            reporter_email: f.reporter_email,
            reporter_contact: f.reporter_contact,
            category: f.category,
            name: f.name,
            photo_url: f.photo_url,
            location: f.location,
            found_date: f.found_date.map(|d| d.to_string()),
            answers: f.answers,
        }
    }
}

/// Claim as seen by the finder.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedClaimResponse {
    pub id: String,
    pub created_at: String,
    pub claimant_id: String,
    pub score: f64,
    pub status: lostfound_db::entities::ClaimStatus,
    pub contact_number: String,
}

/// Found item with its claims.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyFoundItemResponse {
    #[serde(flatten)]
    pub item: FoundItemResponse,
    pub claims: Vec<ReceivedClaimResponse>,
}

impl From<FoundItemWithClaims> for MyFoundItemResponse {
    fn from(f: FoundItemWithClaims) -> Self {
        Self {
            item: f.item.into(),
            claims: f
                .claims
                .into_iter()
                .map(|c| ReceivedClaimResponse {
                    id: c.id,
                    created_at: c.created_at.to_rfc3339(),
                    claimant_id: c.claimant_id,
                    score: c.score,
                    status: c.status,
                    contact_number: c.contact_number,
                })
                .collect(),
        }
    }
}

/// Questions request.
#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub category: String,
}

/// Questions response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsResponse {
    pub category: Category,
    pub editable: bool,
    pub questions: Vec<DraftQuestion>,
}

// ==================== Handlers ====================

async fn questions(
    RegisteredUser(_principal): RegisteredUser,
    Json(req): Json<QuestionsRequest>,
) -> AppResult<ApiResponse<QuestionsResponse>> {
    let category = lostfound_core::parse_category(&req.category)?;

    Ok(ApiResponse::ok(QuestionsResponse {
        category,
        editable: category.is_other(),
        questions: FoundItemService::questions_for(category),
    }))
}

async fn create(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<FoundItemResponse>> {
    let mut category: Option<String> = None;
    let mut name: Option<String> = None;
    let mut location: Option<String> = None;
    let mut found_date: Option<String> = None;
    let mut questions: Option<String> = None;
    let mut photo: Option<PhotoUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "photo" {
            let file_name = field.file_name().unwrap_or("photo").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
                .to_vec();
            photo = Some(PhotoUpload {
                file_name,
                content_type,
                data,
            });
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        match field_name.as_str() {
            "category" => category = Some(text),
            "name" => name = Some(text),
            "location" => location = Some(text),
            "foundDate" => found_date = Some(text),
            "questions" => questions = Some(text),
            _ => {}
        }
    }

    let category = lostfound_core::parse_category(category.as_deref().unwrap_or(""))?;

    let found_date = match found_date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => Some(
            chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                AppError::BadRequest("foundDate: expected a YYYY-MM-DD date".to_string())
            })?,
        ),
        _ => None,
    };

    let questions = match questions.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(
            serde_json::from_str::<Vec<QuestionAnswer>>(raw)
                .map_err(|e| AppError::BadRequest(format!("questions: {e}")))?,
        ),
        _ => None,
    };

    let item = state
        .found_item_service
        .report(
            &principal,
            ReportFoundItemInput {
                category,
                name,
                location,
                found_date,
                photo,
                questions,
            },
        )
        .await?;

    Ok(ApiResponse::ok(item.into()))
}

async fn mine(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<MyFoundItemResponse>>> {
    let items = state.found_item_service.list_mine(&principal).await?;
    Ok(ApiResponse::ok(items.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", post(questions))
        .route(
            "/create",
            post(create).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/mine", post(mine))
}
