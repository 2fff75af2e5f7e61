//! Stateless signed session tokens.
//!
//! A token is `<payload>.<signature>` where `payload` is the URL-safe base64
//! encoding of the JSON claims and `signature` is the URL-safe base64
//! HMAC-SHA256 of the *encoded* payload text, keyed by the session secret.
//! Both parts omit padding. The payload is readable by anyone holding the
//! token; the signature only makes it tamper-evident.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::roles::Role;
use crate::types::Timestamp;

type HmacSha256 = Hmac<Sha256>;

/// Session lifetime: 8 hours, in milliseconds.
pub const SESSION_TTL_MILLIS: i64 = 8 * 60 * 60 * 1000;

/// Claims embedded in every session token.
///
/// Serialized with short keys (`u`, `r`, `exp`) in declaration order, so a
/// given value always encodes to the same JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "u")]
    pub username: String,
    #[serde(rename = "r")]
    pub role: Role,
    /// Absolute expiry, milliseconds since the epoch.
    #[serde(rename = "exp")]
    pub expires_at: Timestamp,
}

impl SessionClaims {
    /// Claims for a fresh login, expiring [`SESSION_TTL_MILLIS`] after `now`.
    pub fn issue(username: impl Into<String>, role: Role, now: Timestamp) -> Self {
        Self {
            username: username.into(),
            role,
            expires_at: now + SESSION_TTL_MILLIS,
        }
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// Reasons a token failed to verify.
///
/// Callers at the HTTP boundary treat every variant as "not logged in";
/// the distinction only matters for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is not of the form <payload>.<signature>")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token payload is invalid: {0}")]
    InvalidPayload(String),

    #[error("token has expired")]
    Expired,
}

fn keyed_mac(secret: &str, encoded_payload: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(encoded_payload.as_bytes());
    mac
}

/// Sign `claims` with `secret`, producing `<payload>.<signature>`.
pub fn sign(claims: &SessionClaims, secret: &str) -> Result<String, TokenError> {
    let json =
        serde_json::to_vec(claims).map_err(|e| TokenError::InvalidPayload(e.to_string()))?;
    let payload = URL_SAFE_NO_PAD.encode(json);
    let signature = URL_SAFE_NO_PAD.encode(keyed_mac(secret, &payload).finalize().into_bytes());
    Ok(format!("{payload}.{signature}"))
}

/// Verify `token` against `secret` at time `now` and return its claims.
///
/// The signature is checked before the payload is decoded, and the
/// comparison is constant-time.
pub fn verify(token: &str, secret: &str, now: Timestamp) -> Result<SessionClaims, TokenError> {
    let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
    if payload.is_empty() || signature.is_empty() {
        return Err(TokenError::Malformed);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::BadSignature)?;
    keyed_mac(secret, payload)
        .verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let json = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| TokenError::InvalidPayload(e.to_string()))?;
    let claims: SessionClaims =
        serde_json::from_slice(&json).map_err(|e| TokenError::InvalidPayload(e.to_string()))?;

    if claims.is_expired(now) {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
    const NOW: Timestamp = 1_760_000_000_000;

    fn claims() -> SessionClaims {
        SessionClaims::issue("marcel", Role::Owner, NOW)
    }

    /// Build a correctly signed token around an arbitrary JSON payload.
    fn sign_raw(json: &str, secret: &str) -> String {
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = URL_SAFE_NO_PAD.encode(keyed_mac(secret, &payload).finalize().into_bytes());
        format!("{payload}.{signature}")
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let token = sign(&claims(), SECRET).unwrap();
        let verified = verify(&token, SECRET, NOW + 1).unwrap();
        assert_eq!(verified, claims());
    }

    #[test]
    fn issue_sets_eight_hour_expiry() {
        let c = claims();
        assert_eq!(c.expires_at - NOW, 8 * 3600 * 1000);
        assert!(!c.is_expired(NOW));
        assert!(c.is_expired(c.expires_at));
    }

    #[test]
    fn payload_uses_compact_keys() {
        let token = sign(&claims(), SECRET).unwrap();
        let (payload, _) = token.split_once('.').unwrap();
        let json = String::from_utf8(URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(
            json,
            format!(r#"{{"u":"marcel","r":"owner","exp":{}}}"#, NOW + SESSION_TTL_MILLIS)
        );
    }

    #[test]
    fn token_is_url_safe() {
        let token = sign(&claims(), SECRET).unwrap();
        assert!(!token.contains(['+', '/', '=']));
        assert_eq!(token.matches('.').count(), 1);
    }

    #[test]
    fn any_changed_character_is_rejected() {
        let token = sign(&claims(), SECRET).unwrap();
        for (i, c) in token.char_indices() {
            let replacement = if c == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(i..i + 1, &replacement.to_string());
            assert!(
                verify(&tampered, SECRET, NOW).is_err(),
                "tampering at position {i} must be detected"
            );
        }
    }

    #[test]
    fn expired_token_fails_even_with_valid_signature() {
        let expired = SessionClaims {
            expires_at: NOW - 1,
            ..claims()
        };
        let token = sign(&expired, SECRET).unwrap();
        assert_matches!(verify(&token, SECRET, NOW), Err(TokenError::Expired));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let token = sign(&claims(), SECRET).unwrap();
        let exp = claims().expires_at;
        assert!(verify(&token, SECRET, exp - 1).is_ok());
        assert_matches!(verify(&token, SECRET, exp), Err(TokenError::Expired));
    }

    #[test]
    fn different_secret_fails() {
        let token = sign(&claims(), "secret-alpha").unwrap();
        assert_matches!(
            verify(&token, "secret-bravo", NOW),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn missing_parts_are_malformed() {
        assert_matches!(verify("", SECRET, NOW), Err(TokenError::Malformed));
        assert_matches!(verify("abc", SECRET, NOW), Err(TokenError::Malformed));
        assert_matches!(verify("abc.", SECRET, NOW), Err(TokenError::Malformed));
        assert_matches!(verify(".abc", SECRET, NOW), Err(TokenError::Malformed));
    }

    #[test]
    fn signed_garbage_payload_is_invalid() {
        let token = sign_raw("not json", SECRET);
        assert_matches!(verify(&token, SECRET, NOW), Err(TokenError::InvalidPayload(_)));
    }

    #[test]
    fn payload_without_expiry_is_invalid() {
        let token = sign_raw(r#"{"u":"marcel","r":"owner"}"#, SECRET);
        assert_matches!(verify(&token, SECRET, NOW), Err(TokenError::InvalidPayload(_)));
    }

    #[test]
    fn payload_with_unknown_role_is_invalid() {
        let json = format!(r#"{{"u":"marcel","r":"root","exp":{}}}"#, NOW + 1000);
        let token = sign_raw(&json, SECRET);
        assert_matches!(verify(&token, SECRET, NOW), Err(TokenError::InvalidPayload(_)));
    }
}
