//! Request extractors shared by handlers.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection goes through [`AppError`], so a malformed
/// or mistyped body gets the usual `{ "ok": false, ... }` error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
