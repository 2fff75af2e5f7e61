//! Naming rules for uploaded files.

use crate::types::Timestamp;

/// Name used when sanitizing leaves nothing behind.
pub const FALLBACK_FILENAME: &str = "upload.pdf";

/// URL prefix under which stored uploads are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Reduce a client-supplied filename to `[A-Za-z0-9._-]`.
///
/// Disallowed characters become `_`, runs of `_` collapse to one, and
/// leading/trailing `_` are dropped. Path separators are disallowed, so the
/// result can never escape the upload directory.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        let ch = if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            ch
        } else {
            '_'
        };
        if ch == '_' && out.ends_with('_') {
            continue;
        }
        out.push(ch);
    }

    let out = out.trim_matches('_');
    // A bare "." or ".." is still a path component.
    if out.is_empty() || out.chars().all(|c| c == '.') {
        FALLBACK_FILENAME.to_string()
    } else {
        out.to_string()
    }
}

/// On-disk name for an upload: creation timestamp, dash, sanitized name.
pub fn stored_filename(now: Timestamp, original: &str) -> String {
    format!("{now}-{}", sanitize_filename(original))
}

/// Retrieval URL for a stored file name.
pub fn upload_url(stored: &str) -> String {
    format!("{UPLOAD_URL_PREFIX}/{stored}")
}
