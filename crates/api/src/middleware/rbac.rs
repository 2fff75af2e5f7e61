//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and runs it through the access gate
//! policy for one [`Requirement`]. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dossier_core::access::{authorize, Requirement};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require(
    parts: &mut Parts,
    state: &AppState,
    required: Requirement,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if let Err(denied) = authorize(Some(&user.session), required) {
        tracing::warn!(username = %user.username(), role = %user.role(), error = %denied, "Access denied");
        return Err(denied.into());
    }
    Ok(user)
}

/// Requires any valid session (`viewer` or `owner`). Rejects with 401 otherwise.
///
/// ```ignore
/// async fn read_only(RequireViewer(user): RequireViewer) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireViewer(pub AuthUser);

impl FromRequestParts<AppState> for RequireViewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Requirement::Viewer)
            .await
            .map(RequireViewer)
    }
}

/// Requires the `owner` role. Rejects with 401 without a session and 403
/// for a `viewer`.
///
/// ```ignore
/// async fn owner_only(RequireOwner(user): RequireOwner) -> AppResult<Json<()>> {
///     // user is guaranteed to be the owner here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireOwner(pub AuthUser);

impl FromRequestParts<AppState> for RequireOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Requirement::Owner)
            .await
            .map(RequireOwner)
    }
}
