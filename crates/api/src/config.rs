use std::path::PathBuf;
use std::str::FromStr;

use dossier_core::credentials::{AuthConfig, Credential};
use dossier_store::FileProjectStore;

/// Default cap on an uploaded file: 20 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Where project data and uploads live on disk.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Primary project file; the only one ever written.
    pub data_file: PathBuf,
    /// Optional second data location, read when the primary is unusable.
    pub secondary_data_file: Option<PathBuf>,
    /// Bundled read-only seed, the last fallback.
    pub seed_file: PathBuf,
    /// Directory uploaded files are written to and served from.
    pub upload_dir: PathBuf,
    /// Upper bound on an upload request body.
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    /// Project store reading `data_file`, then `secondary_data_file` (if
    /// set), then `seed_file`.
    pub fn project_store(&self) -> FileProjectStore {
        let mut store = FileProjectStore::new(&self.data_file);
        if let Some(secondary) = &self.secondary_data_file {
            store = store.with_fallback(secondary);
        }
        store.with_fallback(&self.seed_file)
    }
}

/// Server configuration loaded from environment variables.
///
/// Everything except the credentials and the session secret has a default
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `3000`                         |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                           |
    /// | `DATA_FILE`            | `data/projects.json`           |
    /// | `SECONDARY_DATA_FILE`  | --                             |
    /// | `SEED_FILE`            | `public/assets/projects.json`  |
    /// | `UPLOAD_DIR`           | `public/uploads`               |
    /// | `MAX_UPLOAD_BYTES`     | `20971520`                     |
    /// | `OWNER_USERNAME`       | **required**                   |
    /// | `OWNER_PASSWORD`       | **required**                   |
    /// | `VIEWER_USERNAME`      | -- (set together with password)|
    /// | `VIEWER_PASSWORD`      | --                             |
    /// | `SESSION_SECRET`       | **required**                   |
    /// | `APP_ENV`              | `development`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&var, "PORT", 3000u16)?;
        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout_secs = parse_or(&var, "REQUEST_TIMEOUT_SECS", 30u64)?;

        let storage = StorageConfig {
            data_file: var("DATA_FILE")
                .unwrap_or_else(|| "data/projects.json".into())
                .into(),
            secondary_data_file: var("SECONDARY_DATA_FILE").map(PathBuf::from),
            seed_file: var("SEED_FILE")
                .unwrap_or_else(|| "public/assets/projects.json".into())
                .into(),
            upload_dir: var("UPLOAD_DIR")
                .unwrap_or_else(|| "public/uploads".into())
                .into(),
            max_upload_bytes: parse_or(&var, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        };

        let viewer = match (var("VIEWER_USERNAME"), var("VIEWER_PASSWORD")) {
            (Some(username), Some(password)) => Some(Credential::new(username, password)),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "VIEWER_USERNAME",
                    reason: "VIEWER_USERNAME and VIEWER_PASSWORD must be set together".into(),
                })
            }
        };

        let auth = AuthConfig {
            owner: Credential::new(required("OWNER_USERNAME")?, required("OWNER_PASSWORD")?),
            viewer,
            token_secret: required("SESSION_SECRET")?,
            is_production: var("APP_ENV").is_some_and(|env| env == "production"),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage,
            auth,
        })
    }
}

fn parse_or<T>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
