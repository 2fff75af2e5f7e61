pub mod auth;
pub mod health;
pub mod projects;
pub mod upload;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /login                 login (public)
/// /logout                logout (public)
/// /session               current session (viewer)
///
/// /projects              list (viewer), create (owner)
/// /projects/{id}         update, delete (owner)
///
/// /upload                upload a file (owner)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/projects", projects::router())
        .merge(upload::router(config.storage.max_upload_bytes))
}
