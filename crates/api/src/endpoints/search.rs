//! Search endpoint.

use axum::{Json, Router, extract::State, routing::post};
use lostfound_common::AppResult;
use lostfound_core::FoundItemSummary;
use serde::Deserialize;

use crate::{extractors::RegisteredUser, middleware::AppState, response::ApiResponse};

/// Search request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub category: String,
    pub lost_date: String,
}

async fn search(
    RegisteredUser(principal): RegisteredUser,
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> AppResult<ApiResponse<Vec<FoundItemSummary>>> {
    let category = lostfound_core::parse_category(&req.category)?;
    let lost_date = lostfound_core::parse_date(&req.lost_date, "lostDate")?;

    let hits = state
        .search_service
        .search(&principal, category, lost_date)
        .await?;

    Ok(ApiResponse::ok(hits))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(search))
}
