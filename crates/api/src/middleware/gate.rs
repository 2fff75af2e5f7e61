//! Router-wide session gate.
//!
//! Runs before every route. Public paths pass untouched. Otherwise the
//! session cookie must verify; the claims are then placed in the request
//! extensions for the extractors downstream. Without a valid session, API
//! calls get a 401 JSON error and anything else (uploaded files, pages) is
//! redirected to the login page with the original path in `next`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use dossier_core::access::{is_public_path, AccessError};

use crate::auth::session_from_headers;
use crate::error::AppError;
use crate::state::AppState;

/// Prefix of the JSON API; unauthenticated requests below it are not redirected.
const API_PREFIX: &str = "/api/";

/// Location of the login page.
const LOGIN_PATH: &str = "/login";

pub async fn session_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    if is_public_path(&path) {
        return next.run(req).await;
    }

    if let Some(claims) = session_from_headers(req.headers(), &state.config.auth) {
        req.extensions_mut().insert(claims);
        return next.run(req).await;
    }

    if path.starts_with(API_PREFIX) {
        return AppError::from(AccessError::Unauthenticated).into_response();
    }

    tracing::debug!(path = %path, "Redirecting unauthenticated request to login");
    Redirect::to(&login_redirect(&path)).into_response()
}

/// `/login?next=<path>`, with the path form-encoded.
fn login_redirect(path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", path)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}
