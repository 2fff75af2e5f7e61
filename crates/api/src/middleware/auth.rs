//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dossier_core::access::AccessError;
use dossier_core::roles::Role;
use dossier_core::token::SessionClaims;

use crate::auth::session_from_headers;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, taken from the verified session cookie.
///
/// The gate middleware stores verified claims in the request extensions; the
/// extractor reuses them and only verifies the cookie itself when the gate did
/// not run (e.g. a router built without it).
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username(), role = %user.role(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub session: SessionClaims,
}

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.session.username
    }

    pub fn role(&self) -> Role {
        self.session.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = match parts.extensions.get::<SessionClaims>() {
            Some(claims) => claims.clone(),
            None => session_from_headers(&parts.headers, &state.config.auth)
                .ok_or(AppError::from(AccessError::Unauthenticated))?,
        };
        Ok(AuthUser { session })
    }
}
