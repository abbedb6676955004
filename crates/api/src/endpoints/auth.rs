//! Session endpoint.

use axum::{Router, routing::post};
use lostfound_common::AppResult;
use lostfound_core::{GateDecision, IdentityService};
use serde::Serialize;

use super::account::UserResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Session response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserResponse,
    pub has_contact_number: bool,
    pub gate: GateDecision,
    /// Client route to send the caller to, if any.
    pub redirect: Option<&'static str>,
}

/// Exchange a verified identity token for the caller's session.
async fn session(AuthUser(principal): AuthUser) -> AppResult<ApiResponse<SessionResponse>> {
    let gate = IdentityService::gate(&principal);

    Ok(ApiResponse::ok(SessionResponse {
        has_contact_number: principal.has_contact_number,
        user: principal.user.into(),
        gate,
        redirect: gate.redirect(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/session", post(session))
}
