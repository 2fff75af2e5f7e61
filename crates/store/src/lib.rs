//! Persistence for project records.
//!
//! Callers work against the [`ProjectStore`] trait and never see where or
//! how the collection is kept. [`FileProjectStore`] is the flat-file backing.

use std::path::PathBuf;

use async_trait::async_trait;
use dossier_core::project::{NewProject, ProjectPatch, ProjectRecord};

pub mod file;

pub use file::FileProjectStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Project {id} not found")]
    NotFound { id: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt data file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD over the ordered project collection.
///
/// Every returned collection is sorted newest first by `created_at`.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Current collection. Never fails: unreadable storage yields an empty list.
    async fn list(&self) -> Vec<ProjectRecord>;

    /// Insert a new record with a fresh id and creation time.
    async fn create(&self, input: NewProject) -> StoreResult<(ProjectRecord, Vec<ProjectRecord>)>;

    /// Apply `patch` to the record with `id`.
    async fn update(
        &self,
        id: &str,
        patch: &ProjectPatch,
    ) -> StoreResult<(ProjectRecord, Vec<ProjectRecord>)>;

    /// Remove the record with `id`, returning what is left.
    async fn delete(&self, id: &str) -> StoreResult<Vec<ProjectRecord>>;
}
