//! M-Pesa client configuration.
//!
//! Configures the base URL of each environment, the certificate directory
//! and the request timeout. Defaults point to the public Daraja endpoints.
//! Override via environment variables or explicit construction for
//! proxies and tests.
//!
//! Consumer keys are deliberately absent: they are supplied per call.

use std::path::PathBuf;

use mpesa_core::Environment;
use url::Url;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the Daraja API.
#[derive(Debug, Clone)]
pub struct MpesaConfig {
    /// Base URL of the production deployment.
    /// Default: <https://api.safaricom.co.ke>
    pub live_base_url: Url,
    /// Base URL of the sandbox deployment.
    /// Default: <https://sandbox.safaricom.co.ke>
    pub sandbox_base_url: Url,
    /// Directory holding `ProductionCertificate.cer` and
    /// `SandboxCertificate.cer`.
    pub certificate_dir: PathBuf,
    /// Request timeout in seconds, applied to every HTTP request.
    pub timeout_secs: u64,
}

impl MpesaConfig {
    /// Public endpoints, certificates under `certificate_dir`.
    pub fn new(certificate_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            live_base_url: parse_base_url("live", Environment::Live.default_base_url())?,
            sandbox_base_url: parse_base_url(
                "sandbox",
                Environment::Sandbox.default_base_url(),
            )?,
            certificate_dir: certificate_dir.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `MPESA_LIVE_BASE_URL` (default: `https://api.safaricom.co.ke`)
    /// - `MPESA_SANDBOX_BASE_URL` (default: `https://sandbox.safaricom.co.ke`)
    /// - `MPESA_CERT_DIR` (default: `certs`)
    /// - `MPESA_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = match std::env::var("MPESA_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            live_base_url: env_url("MPESA_LIVE_BASE_URL", Environment::Live.default_base_url())?,
            sandbox_base_url: env_url(
                "MPESA_SANDBOX_BASE_URL",
                Environment::Sandbox.default_base_url(),
            )?,
            certificate_dir: std::env::var("MPESA_CERT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("certs")),
            timeout_secs,
        })
    }

    /// Point both environments at one local mock server (for testing).
    pub fn local_mock(
        base_url: &str,
        certificate_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let url = parse_base_url("mock", base_url)?;
        Ok(Self {
            live_base_url: url.clone(),
            sandbox_base_url: url,
            certificate_dir: certificate_dir.into(),
            timeout_secs: 5,
        })
    }

    /// Base URL for `environment`.
    pub fn base_url(&self, environment: Environment) -> &Url {
        match environment {
            Environment::Live => &self.live_base_url,
            Environment::Sandbox => &self.sandbox_base_url,
        }
    }

    /// Absolute URL of `path` (relative, no leading slash) under the base
    /// URL of `environment`.
    pub fn endpoint_url(&self, environment: Environment, path: &str) -> Result<Url, ConfigError> {
        self.base_url(environment)
            .join(path)
            .map_err(|e| ConfigError::InvalidUrl(path.to_string(), e.to_string()))
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_base_url(var, &raw)
}

/// Parse a base URL and make sure its path ends in `/` so relative
/// operation paths join underneath it.
fn parse_base_url(label: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(label.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            label.to_string(),
            "not a base URL".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("MPESA_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}
