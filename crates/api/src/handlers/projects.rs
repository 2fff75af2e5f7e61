//! Handlers for the `/api/projects` resource.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dossier_core::project::{NewProject, ProjectPatch, ProjectRecord};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::rbac::{RequireOwner, RequireViewer};
use crate::response::OkResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ItemsBody {
    pub items: Vec<ProjectRecord>,
}

/// A written record together with the full collection after the write.
#[derive(Debug, Serialize)]
pub struct ItemBody {
    pub item: ProjectRecord,
    pub items: Vec<ProjectRecord>,
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    RequireViewer(_user): RequireViewer,
) -> Json<OkResponse<ItemsBody>> {
    let items = state.store.list().await;
    Json(OkResponse::new(ItemsBody { items }))
}

/// POST /api/projects
///
/// Requires a title or a URL. The type defaults to `pdf`.
pub async fn create(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    ApiJson(input): ApiJson<NewProject>,
) -> AppResult<(StatusCode, Json<OkResponse<ItemBody>>)> {
    input.validate()?;
    let (item, items) = state.store.create(input).await?;
    tracing::debug!(username = %user.username(), id = %item.id, "Project created via API");
    Ok((
        StatusCode::CREATED,
        Json(OkResponse::new(ItemBody { item, items })),
    ))
}

/// PATCH /api/projects/{id}
///
/// Overwrites only the supplied fields. A missing or unreadable body is an
/// empty patch, so the record is returned unchanged.
pub async fn update(
    State(state): State<AppState>,
    RequireOwner(_user): RequireOwner,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Json<OkResponse<ItemBody>>> {
    let patch = patch_from_body(&body);
    let (item, items) = state.store.update(&id, &patch).await?;
    Ok(Json(OkResponse::new(ItemBody { item, items })))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireOwner(_user): RequireOwner,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse<ItemsBody>>> {
    let items = state.store.delete(&id).await?;
    Ok(Json(OkResponse::new(ItemsBody { items })))
}

fn patch_from_body(body: &[u8]) -> ProjectPatch {
    if body.iter().all(u8::is_ascii_whitespace) {
        return ProjectPatch::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring unreadable patch body");
        ProjectPatch::default()
    })
}
