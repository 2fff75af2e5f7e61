//! Shared success envelope for API handlers.
//!
//! Every successful JSON response carries `"ok": true` next to its payload
//! fields. Errors carry `"ok": false` (see [`crate::error::AppError`]).

use serde::Serialize;

/// `{ "ok": true, ...body }` response envelope.
///
/// `T` must serialize as a map (a struct with named fields).
///
/// ```ignore
/// Ok(Json(OkResponse::new(ItemsBody { items })))
/// ```
#[derive(Debug, Serialize)]
pub struct OkResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> OkResponse<T> {
    pub fn new(body: T) -> Self {
        Self { ok: true, body }
    }
}

/// Body with no fields beyond `ok`.
#[derive(Debug, Serialize)]
pub struct Empty {}
