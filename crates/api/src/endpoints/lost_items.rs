//! Lost-item endpoints.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use lostfound_common::AppResult;
use lostfound_core::ReportLostItemInput;
use lostfound_db::entities::{Category, lost_item};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::RegisteredUser,
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// Lost item response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LostItemResponse {
    pub id: String,
    pub created_at: String,
    pub user_id: String,
    pub user_email: String,
    pub category: Category,
    pub name: String,
    pub location: String,
    pub lost_date: String,
    pub description: String,
}

impl From<lost_item::Model> for LostItemResponse {
    fn from(l: lost_item::Model) -> Self {
        Self {
            id: l.id,
            created_at: l.created_at.to_rfc3339(),
            user_id: l.user_id,
            user_email: l.user_email,
            category: l.category,
            name: l.name,
            location: l.location,
            lost_date: l.lost_date.to_string(),
            description: l.description,
        }
    }
}

/// Withdraw request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub lost_item_id: String,
}

async fn create(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
    Json(req): Json<ReportLostItemInput>,
) -> AppResult<ApiResponse<LostItemResponse>> {
    let item = state.lost_item_service.report(&principal, req).await?;
    Ok(ApiResponse::ok(item.into()))
}

async fn mine(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<LostItemResponse>>> {
    let items = state.lost_item_service.list_mine(&principal).await?;
    Ok(ApiResponse::ok(items.into_iter().map(Into::into).collect()))
}

async fn withdraw(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
    Json(req): Json<WithdrawRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .lost_item_service
        .withdraw(&principal, &req.lost_item_id)
        .await?;
    Ok(ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/mine", post(mine))
        .route("/withdraw", post(withdraw))
}
