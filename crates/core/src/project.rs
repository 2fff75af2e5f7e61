//! Project records: the certificates, references, diplomas and links shown in
//! the document library, plus the create/patch inputs that produce them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Category assigned when a create request names none.
pub const DEFAULT_KIND: &str = "pdf";

/// One entry in the document library.
///
/// `kind` is a free-text tag (`certificate`, `diploma`, `zeugnis`, `cv`,
/// `pdf`, `link`, `project`, ...) used only for grouping on the client.
/// Fields the server does not know about are kept in `extra` so a rewrite
/// of the collection never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Read a text field from hand-edited data: `null` and other non-text
/// values become empty, numbers and booleans keep their JSON spelling.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Read `createdAt` as an integer, a float (truncated) or a numeric string.
/// Anything else sorts as the epoch.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    };
    Ok(millis.unwrap_or_default())
}

/// Input for creating a record. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProject {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub code: Option<String>,
}

/// Partial update: only the fields present are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub code: Option<String>,
}

fn trimmed(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or_default()
}

impl NewProject {
    /// A record needs at least a title or a URL to be worth listing.
    pub fn validate(&self) -> Result<(), CoreError> {
        if trimmed(self.title.as_deref()).is_empty() && trimmed(self.url.as_deref()).is_empty() {
            return Err(CoreError::Validation("Title or URL is required".into()));
        }
        Ok(())
    }

    /// Build the stored record: trim every field, default the kind, and
    /// derive a title from the URL (or the kind) when none was given.
    pub fn into_record(self, id: String, now: Timestamp) -> ProjectRecord {
        let kind = match trimmed(self.kind.as_deref()) {
            "" => DEFAULT_KIND.to_string(),
            k => k.to_string(),
        };
        let url = trimmed(self.url.as_deref()).to_string();
        let title = match trimmed(self.title.as_deref()) {
            "" => derive_title(&url, &kind),
            t => t.to_string(),
        };

        ProjectRecord {
            id,
            title,
            kind,
            description: trimmed(self.description.as_deref()).to_string(),
            url,
            code: trimmed(self.code.as_deref()).to_string(),
            created_at: now,
            extra: serde_json::Map::new(),
        }
    }
}

impl ProjectPatch {
    /// Overwrite the supplied fields on `record`. `id` and `created_at` are
    /// never touched.
    pub fn apply(&self, record: &mut ProjectRecord) {
        let fields = [
            (&self.title, &mut record.title),
            (&self.kind, &mut record.kind),
            (&self.description, &mut record.description),
            (&self.url, &mut record.url),
            (&self.code, &mut record.code),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v.trim().to_string();
            }
        }
    }
}

/// Title for a record created without one.
///
/// Uses the last path segment of `url` minus its extension, with runs of
/// `.`, `_` and `-` turned into single spaces. Falls back to `kind` when the
/// URL yields nothing.
pub fn derive_title(url: &str, kind: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let base = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    let stem = match base.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => stem,
        _ => base,
    };

    let mut title = String::with_capacity(stem.len());
    for ch in stem.chars() {
        if matches!(ch, '.' | '_' | '-') {
            if !title.ends_with(' ') {
                title.push(' ');
            }
        } else {
            title.push(ch);
        }
    }

    let title = title.trim();
    if title.is_empty() {
        kind.trim().to_string()
    } else {
        title.to_string()
    }
}

/// Sort newest first by `created_at`. Ties keep their relative order.
pub fn sort_newest_first(records: &mut [ProjectRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
