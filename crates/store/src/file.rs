//! Flat-file project store.
//!
//! The whole collection lives in one pretty-printed JSON file. Reads fall
//! through an ordered chain of locations (primary, then any fallbacks such
//! as a bundled seed file). Writes always go to the primary location.
//!
//! Each write is a read-modify-write of the entire file with no locking:
//! two concurrent writers race and the last one to finish wins, silently
//! discarding the other's change. Acceptable for a single-operator site.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dossier_core::project::{sort_newest_first, NewProject, ProjectPatch, ProjectRecord};
use dossier_core::types::now_millis;
use serde::Deserialize;
use uuid::Uuid;

use crate::{ProjectStore, StoreError, StoreResult};

/// Accepted on-disk shapes: a bare array, or `{ "items": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Collection {
    Bare(Vec<ProjectRecord>),
    Wrapped { items: Vec<ProjectRecord> },
}

impl Collection {
    fn into_records(self) -> Vec<ProjectRecord> {
        match self {
            Collection::Bare(items) | Collection::Wrapped { items } => items,
        }
    }
}

fn parse(bytes: &[u8]) -> Result<Vec<ProjectRecord>, serde_json::Error> {
    let mut items = serde_json::from_slice::<Collection>(bytes)?.into_records();
    sort_newest_first(&mut items);
    Ok(items)
}

/// [`ProjectStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileProjectStore {
    primary: PathBuf,
    fallbacks: Vec<PathBuf>,
}

impl FileProjectStore {
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallbacks: Vec::new(),
        }
    }

    /// Append a read-only location consulted when earlier ones fail.
    pub fn with_fallback(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallbacks.push(path.into());
        self
    }

    /// First fallback that reads and parses, or an empty collection.
    async fn read_fallbacks(&self) -> Vec<ProjectRecord> {
        for path in &self.fallbacks {
            if let Some(items) = read_soft(path).await {
                tracing::debug!(path = %path.display(), count = items.len(), "Read projects from fallback");
                return items;
            }
        }
        Vec::new()
    }

    /// Collection to modify on a write.
    ///
    /// A missing primary file is normal (first write seeds from the fallback
    /// chain), but a primary file that exists and cannot be read or parsed is
    /// an error: overwriting it would lose data.
    async fn load_for_write(&self) -> StoreResult<Vec<ProjectRecord>> {
        match tokio::fs::read(&self.primary).await {
            Ok(bytes) => parse(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.primary.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(self.read_fallbacks().await),
            Err(source) => Err(StoreError::Io {
                path: self.primary.clone(),
                source,
            }),
        }
    }

    /// Sort and write the full collection to the primary location.
    ///
    /// Writes to a sibling temp file and renames it over the target, so a
    /// reader never sees a half-written file.
    async fn persist(&self, mut items: Vec<ProjectRecord>) -> StoreResult<Vec<ProjectRecord>> {
        sort_newest_first(&mut items);

        if let Some(dir) = self.primary.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| io_error(dir, source))?;
        }

        let json = serde_json::to_vec_pretty(&items)?;
        let tmp = self.primary.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| io_error(&tmp, source))?;
        tokio::fs::rename(&tmp, &self.primary)
            .await
            .map_err(|source| io_error(&self.primary, source))?;

        tracing::debug!(path = %self.primary.display(), count = items.len(), "Persisted projects");
        Ok(items)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and parse `path`, logging and swallowing any failure.
async fn read_soft(path: &Path) -> Option<Vec<ProjectRecord>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot read projects file");
            return None;
        }
    };
    match parse(&bytes) {
        Ok(items) => Some(items),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot parse projects file");
            None
        }
    }
}

#[async_trait]
impl ProjectStore for FileProjectStore {
    async fn list(&self) -> Vec<ProjectRecord> {
        match read_soft(&self.primary).await {
            Some(items) => items,
            None => self.read_fallbacks().await,
        }
    }

    async fn create(&self, input: NewProject) -> StoreResult<(ProjectRecord, Vec<ProjectRecord>)> {
        let mut items = self.load_for_write().await?;
        let record = input.into_record(Uuid::new_v4().to_string(), now_millis());
        items.push(record.clone());
        let items = self.persist(items).await?;
        tracing::info!(id = %record.id, kind = %record.kind, "Created project");
        Ok((record, items))
    }

    async fn update(
        &self,
        id: &str,
        patch: &ProjectPatch,
    ) -> StoreResult<(ProjectRecord, Vec<ProjectRecord>)> {
        let mut items = self.load_for_write().await?;
        let record = items
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        patch.apply(record);
        let record = record.clone();
        let items = self.persist(items).await?;
        tracing::info!(id = %record.id, "Updated project");
        Ok((record, items))
    }

    async fn delete(&self, id: &str) -> StoreResult<Vec<ProjectRecord>> {
        let mut items = self.load_for_write().await?;
        let before = items.len();
        items.retain(|r| r.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        let items = self.persist(items).await?;
        tracing::info!(id, "Deleted project");
        Ok(items)
    }
}
