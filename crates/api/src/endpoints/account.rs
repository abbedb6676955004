//! Account endpoints.

use axum::{Json, Router, extract::State, routing::post};
use lostfound_common::AppResult;
use lostfound_core::{GateDecision, IdentityService, Principal};
use lostfound_db::entities::user;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// User response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub contact_number: Option<String>,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            photo_url: u.photo_url,
            contact_number: u.contact_number,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Landing profile response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub has_contact_number: bool,
    pub has_lost_report: bool,
    pub gate: GateDecision,
    pub redirect: Option<&'static str>,
}

/// Set contact number request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetContactNumberRequest {
    #[validate(length(min = 1, max = 32))]
    pub contact_number: String,
}

async fn profile(
    AuthUser(principal): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let gate = IdentityService::gate(&principal);
    let has_lost_report = if principal.has_contact_number {
        state.lost_item_service.has_report(&principal).await?
    } else {
        false
    };

    let Principal {
        user,
        has_contact_number,
    } = principal;

    Ok(ApiResponse::ok(ProfileResponse {
        user: user.into(),
        has_contact_number,
        has_lost_report,
        gate,
        redirect: gate.redirect(),
    }))
}

async fn set_contact_number(
    AuthUser(principal): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SetContactNumberRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    req.validate()?;

    let user = state
        .identity_service
        .set_contact_number(&principal, &req.contact_number)
        .await?;

    Ok(ApiResponse::ok(user.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(profile))
        .route("/contact-number", post(set_contact_number))
}
