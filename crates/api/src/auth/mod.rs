//! Session authentication.
//!
//! - [`cookie`] -- reading the session cookie and building `Set-Cookie` values.
//!
//! Token signing and verification live in `dossier_core::token`; this module
//! only glues them to HTTP headers.

pub mod cookie;

use axum::http::HeaderMap;
use dossier_core::credentials::AuthConfig;
use dossier_core::token::{self, SessionClaims};
use dossier_core::types::now_millis;

/// Verify the session cookie on a request, if any.
///
/// Returns `None` for a missing cookie and for any token that fails
/// verification (bad signature, garbage payload, expired).
pub fn session_from_headers(headers: &HeaderMap, auth: &AuthConfig) -> Option<SessionClaims> {
    let raw = cookie::get_cookie(headers, cookie::SESSION_COOKIE)?;
    match token::verify(raw, &auth.token_secret, now_millis()) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session token");
            None
        }
    }
}
