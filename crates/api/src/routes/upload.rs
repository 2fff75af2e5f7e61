//! Route definition for file uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// `POST /upload`, with the request body capped at `max_bytes`.
pub fn router(max_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/upload",
        post(upload::upload).layer(DefaultBodyLimit::max(max_bytes)),
    )
}
