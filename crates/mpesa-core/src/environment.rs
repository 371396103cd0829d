//! # Environment
//!
//! The Daraja API runs two independent deployments. Each has its own base
//! URL, its own OAuth endpoint, its own consumer key pairs and its own
//! public-key certificate for sealing initiator passwords. Credentials from
//! one deployment are rejected by the other.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EnvironmentError;

/// Target deployment of the Daraja API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production (`api.safaricom.co.ke`). Moves real money.
    Live,
    /// Developer sandbox (`sandbox.safaricom.co.ke`).
    Sandbox,
}

impl Environment {
    /// Both environments, production first.
    pub const ALL: [Environment; 2] = [Environment::Live, Environment::Sandbox];

    /// The identifier accepted by [`FromStr`] and emitted by serde.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Sandbox => "sandbox",
        }
    }

    /// Default public base URL of this deployment, without a trailing slash.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Live => "https://api.safaricom.co.ke",
            Self::Sandbox => "https://sandbox.safaricom.co.ke",
        }
    }

    /// File name of the public-key certificate used to seal initiator
    /// passwords for this deployment.
    pub fn certificate_file_name(&self) -> &'static str {
        match self {
            Self::Live => "ProductionCertificate.cer",
            Self::Sandbox => "SandboxCertificate.cer",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = EnvironmentError;

    /// Case-sensitive: only `live` and `sandbox` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(Self::Live),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(EnvironmentError(other.to_string())),
        }
    }
}
