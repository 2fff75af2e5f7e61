//! Handler for `POST /api/upload`.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use dossier_core::types::now_millis;
use dossier_core::upload::{stored_filename, upload_url};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireOwner;
use crate::response::OkResponse;
use crate::state::AppState;

/// Name of the multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct StoredFile {
    /// On-disk name: `<timestamp>-<sanitized original>`.
    pub name: String,
    pub size: usize,
    /// Retrieval path, suitable for a record's `url`.
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct UploadBody {
    pub file: StoredFile,
}

/// POST /api/upload
///
/// Accepts one multipart field named `file`, stores it under the upload
/// directory, and returns the path it is served from. The body is buffered
/// in memory; its size is capped by the route's body limit.
pub async fn upload(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    mut multipart: Multipart,
) -> AppResult<Json<OkResponse<UploadBody>>> {
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue; // ignore unknown fields
        }
        let Some(original) = field.file_name().map(str::to_string) else {
            return Err(AppError::BadRequest(
                "The 'file' field must be a file, not text".into(),
            ));
        };
        let data = field.bytes().await?;
        file = Some((original, data));
    }

    let (original, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let upload_dir = &state.config.storage.upload_dir;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Cannot create upload directory: {e}")))?;

    let name = stored_filename(now_millis(), &original);
    let target = upload_dir.join(&name);
    tokio::fs::write(&target, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Cannot write upload: {e}")))?;

    tracing::info!(
        username = %user.username(),
        original = %original,
        stored = %name,
        size = data.len(),
        "File uploaded"
    );

    Ok(Json(OkResponse::new(UploadBody {
        file: StoredFile {
            url: upload_url(&name),
            size: data.len(),
            name,
        },
    })))
}
