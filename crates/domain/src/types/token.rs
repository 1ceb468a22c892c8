//! Credential types
//!
//! A [`Token`] carries a lifetime relative to the moment it was issued. The
//! absolute expiry is derived from the moment the pair was persisted, which
//! is returned alongside the pair as [`PersistedTokens::persisted_at`].

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access or refresh token with a relative lifetime in seconds.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    pub expires_in: i64,
}

impl Token {
    pub fn new(value: impl Into<String>, expires_in: i64) -> Self {
        Self { value: value.into(), expires_in }
    }

    /// The zero-value token present before first acquisition.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &redact(&self.value))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Current access/refresh pair. Both fields always exist; either may be
/// [`Token::empty`] before the first successful acquisition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: Token,
    pub refresh: Token,
}

impl TokenPair {
    pub fn new(access: Token, refresh: Token) -> Self {
        Self { access, refresh }
    }

    /// Absolute expiry of the access token given when the pair was persisted.
    ///
    /// `None` when the lifetime does not fit in a timestamp.
    #[must_use]
    pub fn access_expires_at(&self, persisted_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Duration::try_seconds(self.access.expires_in)
            .and_then(|lifetime| persisted_at.checked_add_signed(lifetime))
    }

    /// `true` while `now <= persisted_at + access.expires_in`.
    ///
    /// Pure function of its inputs; the boundary instant still counts as
    /// valid. Access and refresh share one persistence timestamp. A
    /// lifetime past the representable range never expires (or, if
    /// negative, is already expired).
    #[must_use]
    pub fn access_valid_at(&self, persisted_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if self.access.is_empty() {
            return false;
        }
        match self.access_expires_at(persisted_at) {
            Some(expires_at) => now <= expires_at,
            None => self.access.expires_in > 0,
        }
    }
}

/// A token pair as loaded from storage, with the moment it was last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTokens {
    pub pair: TokenPair,
    pub persisted_at: DateTime<Utc>,
}

impl PersistedTokens {
    pub fn new(pair: TokenPair, persisted_at: DateTime<Utc>) -> Self {
        Self { pair, persisted_at }
    }

    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.pair.access_valid_at(self.persisted_at, now)
    }
}

/// Long-lived session cookie value (NPSSO) used to bootstrap tokens.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionHandle(String);

impl SessionHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Short prefix safe to write to logs.
    #[must_use]
    pub fn redacted(&self) -> String {
        redact(&self.0)
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionHandle").field(&self.redacted()).finish()
    }
}

impl From<String> for SessionHandle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionHandle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Application identifier plus optional secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: Option<String>,
}

impl ClientIdentity {
    pub fn new(client_id: impl Into<String>, client_secret: Option<String>) -> Self {
        Self { client_id: client_id.into(), client_secret }
    }

    /// Secret as sent on the wire (empty when none was configured).
    #[must_use]
    pub fn secret_or_empty(&self) -> &str {
        self.client_secret.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Redact a secret down to a short prefix.
#[must_use]
pub fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let prefix: String = secret.chars().take(6).collect();
    format!("{prefix}***")
}
