//! API endpoints.

mod account;
mod auth;
mod claims;
mod found_items;
mod lost_items;
mod search;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/i", account::router())
        .nest("/found-items", found_items::router())
        .nest("/lost-items", lost_items::router())
        .nest("/search", search::router())
        .nest("/claims", claims::router())
}
