//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use lostfound_common::AppError;
use lostfound_core::Principal;

/// Signed-in caller extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by auth middleware
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Signed-in caller with a contact number on file.
///
/// Every feature past the landing page requires one.
#[derive(Debug, Clone)]
pub struct RegisteredUser(pub Principal);

impl<S> FromRequestParts<S> for RegisteredUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(principal) = AuthUser::from_request_parts(parts, state).await?;
        if principal.has_contact_number {
            Ok(Self(principal))
        } else {
            Err(AppError::ContactNumberRequired)
        }
    }
}
