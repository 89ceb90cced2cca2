//! Bearer credential decoding.
//!
//! The backend issues an opaque bearer credential (a JWT) on successful
//! authentication. This module decodes its payload into a structured
//! [`ClaimSet`] so the client can derive an identity and an expiry from it.
//!
//! Decoding deliberately skips signature verification: the client only uses
//! the claims to drive the UI and to avoid presenting obviously expired
//! credentials. The backend validates the signature on every request.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Opaque bearer credential issued by the backend.
///
/// Immutable once issued; carries its own expiry in the embedded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Creates a bearer token from its raw string form.
    #[must_use]
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Returns the raw credential string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BearerToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for BearerToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Realm role list embedded in the credential payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RealmAccess {
    /// Raw authorization role names, in issuer order.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Structured claims decoded from a bearer credential.
///
/// Produced only by [`decode`]; never constructed directly. A claim set
/// whose expiry is in the past must not back an active session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClaimSet {
    /// Subject - unique user identifier from the issuer.
    sub: String,
    /// When the credential was issued.
    #[serde(with = "chrono::serde::ts_seconds")]
    iat: DateTime<Utc>,
    /// When the credential expires.
    #[serde(with = "chrono::serde::ts_seconds")]
    exp: DateTime<Utc>,
    /// Unique credential identifier.
    jti: String,
    /// Issuer URL.
    iss: String,
    /// Authorization scope string (e.g. "openid profile email").
    #[serde(default)]
    scope: String,
    /// Realm role list, if the issuer includes one.
    #[serde(default)]
    realm_access: Option<RealmAccess>,
    /// Preferred display username, if present.
    #[serde(default)]
    preferred_username: Option<String>,
    /// Full display name, if present.
    #[serde(default)]
    name: Option<String>,
    /// Email address, if present.
    #[serde(default)]
    email: Option<String>,
}

impl ClaimSet {
    /// Returns the subject identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Returns when the credential was issued.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.iat
    }

    /// Returns when the credential expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.exp
    }

    /// Returns the unique credential identifier.
    #[must_use]
    pub fn token_id(&self) -> &str {
        &self.jti
    }

    /// Returns the issuer URL.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.iss
    }

    /// Returns the authorization scope string.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns the realm roles in issuer order, or an empty slice.
    #[must_use]
    pub fn realm_roles(&self) -> &[String] {
        self.realm_access
            .as_ref()
            .map(|ra| ra.roles.as_slice())
            .unwrap_or_default()
    }

    /// Returns the preferred display username, if present.
    #[must_use]
    pub fn preferred_username(&self) -> Option<&str> {
        self.preferred_username.as_deref()
    }

    /// Returns the full display name, if present.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the email address, if present.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns true if the credential expires at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now
    }

    /// Returns true if the credential has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Decodes a bearer credential into a claim set, checking expiry at `now`.
///
/// Pure function with no side effects; robust against arbitrary input.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] when the string cannot be parsed into
/// the expected payload, and [`TokenError::Expired`] when the embedded
/// expiry is at or before `now`. Callers decide whether "expired" is fatal
/// (the lifecycle controller treats it so) or advisory.
pub fn decode_at(credential: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenError> {
    let mut segments = credential.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed {
            reason: "expected three dot-separated segments".to_string(),
        });
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| TokenError::Malformed {
            reason: format!("payload is not valid base64url: {e}"),
        })?;

    let claims: ClaimSet = serde_json::from_slice(&bytes).map_err(|e| TokenError::Malformed {
        reason: format!("payload is not a valid claim set: {e}"),
    })?;

    if claims.iat > claims.exp {
        return Err(TokenError::Malformed {
            reason: "issued after expiry".to_string(),
        });
    }

    if claims.is_expired_at(now) {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Decodes a bearer credential into a claim set, checking expiry against
/// the current time.
///
/// # Errors
///
/// See [`decode_at`].
pub fn decode(credential: &BearerToken) -> Result<ClaimSet, TokenError> {
    decode_at(credential.as_str(), Utc::now())
}


#[cfg(test)]
mod tests {
    use super::test_support::{forge_token, forge_user_token};
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn decode_valid_token_yields_claims() {
        let raw = forge_user_token("alice", &["USER"], 3600);
        let claims = decode(&BearerToken::new(raw)).expect("decode");

        assert_eq!(claims.subject(), "alice");
        assert_eq!(claims.issuer(), "https://id.amber-vault.test/realms/banking");
        assert_eq!(claims.scope(), "openid profile email");
        assert_eq!(claims.realm_roles(), &["USER".to_string()]);
        assert_eq!(claims.preferred_username(), Some("alice"));
        assert!(!claims.is_expired());
        assert!(claims.issued_at() <= claims.expires_at());
    }

    #[test]
    fn decode_expired_token_yields_expired() {
        let raw = forge_user_token("alice", &["USER"], -60);
        let err = decode(&BearerToken::new(raw)).expect_err("should be expired");
        assert_eq!(err, TokenError::Expired);
    }

    #[test]
    fn decode_garbage_yields_malformed() {
        for raw in ["", "not-a-jwt", "a.b", "a.b.c.d", "only one segment"] {
            let err = decode(&BearerToken::from(raw)).expect_err("should be malformed");
            assert!(matches!(err, TokenError::Malformed { .. }), "input: {raw}");
        }
    }

    #[test]
    fn decode_non_base64_payload_yields_malformed() {
        let err = decode(&BearerToken::from("head.!!not-base64!!.sig"))
            .expect_err("should be malformed");
        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[test]
    fn decode_non_json_payload_yields_malformed() {
        let body = URL_SAFE_NO_PAD.encode(b"plain text");
        let raw = format!("head.{body}.sig");
        let err = decode(&BearerToken::new(raw)).expect_err("should be malformed");
        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[test]
    fn decode_missing_required_claims_yields_malformed() {
        let raw = forge_token(&json!({ "sub": "alice" }));
        let err = decode(&BearerToken::new(raw)).expect_err("should be malformed");
        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[test]
    fn decode_rejects_issue_after_expiry() {
        let now = Utc::now();
        let raw = forge_token(&json!({
            "sub": "alice",
            "iat": (now + Duration::hours(2)).timestamp(),
            "exp": (now + Duration::hours(1)).timestamp(),
            "jti": "jti-1",
            "iss": "https://id.amber-vault.test",
        }));
        let err = decode(&BearerToken::new(raw)).expect_err("should be malformed");
        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[test]
    fn decode_at_uses_provided_clock() {
        let now = Utc::now();
        let raw = forge_user_token("alice", &[], 30);

        // Valid right now, expired an hour from now.
        assert!(decode_at(&raw, now).is_ok());
        assert_eq!(
            decode_at(&raw, now + Duration::hours(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn missing_realm_access_yields_empty_roles() {
        let now = Utc::now();
        let raw = forge_token(&json!({
            "sub": "alice",
            "iat": now.timestamp(),
            "exp": (now + Duration::hours(1)).timestamp(),
            "jti": "jti-1",
            "iss": "https://id.amber-vault.test",
            "scope": "openid",
        }));
        let claims = decode(&BearerToken::new(raw)).expect("decode");
        assert!(claims.realm_roles().is_empty());
        assert!(claims.preferred_username().is_none());
        assert!(claims.email().is_none());
    }

    #[test]
    fn unknown_payload_fields_are_ignored() {
        let now = Utc::now();
        let raw = forge_token(&json!({
            "sub": "alice",
            "iat": now.timestamp(),
            "exp": (now + Duration::hours(1)).timestamp(),
            "jti": "jti-1",
            "iss": "https://id.amber-vault.test",
            "azp": "web-client",
            "session_state": "abc123",
        }));
        assert!(decode(&BearerToken::new(raw)).is_ok());
    }
}
