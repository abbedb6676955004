//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use lostfound_common::AppError;
use lostfound_core::{
    ClaimService, FoundItemService, IdentityService, LostItemService, SearchService,
};
use tracing::debug;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub identity_service: IdentityService,
    pub found_item_service: FoundItemService,
    pub lost_item_service: LostItemService,
    pub search_service: SearchService,
    pub claim_service: ClaimService,
}

/// Authentication middleware.
///
/// Resolves the bearer token into a [`lostfound_core::Principal`] stored in
/// the request extensions. Requests without a valid token pass through
/// unauthenticated; tokens for a disallowed email domain are refused here.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .map(ToString::to_string);

    if let Some(token) = token {
        match state.identity_service.authenticate(&token).await {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
            }
            Err(e @ AppError::Forbidden(_)) => return e.into_response(),
            Err(e) => debug!(error = %e, "Bearer token rejected"),
        }
    }

    next.run(req).await
}
