//! Consumer credentials, access tokens and the [`Secret`] wrapper.
//!
//! Every secret-bearing value is zeroized on drop and prints as
//! `[REDACTED]` through `Debug`.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use zeroize::Zeroizing;

/// A secret string: consumer secret, initiator password, passkey or token.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// The secret text. Callers must not log it.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Serializes as the plain string; used only to lower typed requests into
/// request parameters.
impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

/// API key pair issued per Daraja app. Exchanged for an [`AccessToken`];
/// never stored by the client.
#[derive(Debug, Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: Secret,
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<Secret>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &Secret {
        &self.consumer_secret
    }
}

/// Short-lived bearer token from the OAuth endpoint.
///
/// Not cached: each operation call obtains a fresh one.
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: Secret,
    obtained_at: DateTime<Utc>,
    expires_in: Option<u64>,
}

impl AccessToken {
    pub(crate) fn new(value: String, obtained_at: DateTime<Utc>, expires_in: Option<u64>) -> Self {
        Self {
            value: Secret::new(value),
            obtained_at,
            expires_in,
        }
    }

    pub fn secret(&self) -> &Secret {
        &self.value
    }

    pub fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }

    /// Lifetime in seconds as stated by the OAuth server, if it said.
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}
