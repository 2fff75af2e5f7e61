use std::sync::Arc;

use dossier_store::ProjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including credentials and the session secret.
    pub config: Arc<ServerConfig>,
    /// Project record persistence.
    pub store: Arc<dyn ProjectStore>,
}
