//! M-Pesa client error types.
//!
//! Variants carry the endpoint label (`"POST /mpesa/b2c/v1/paymentrequest"`)
//! and the upstream status and body where there is one. Access tokens,
//! consumer secrets, initiator passwords and security credentials never
//! appear in an error.

use mpesa_core::EnvironmentError;
use mpesa_crypto::SealError;

use crate::config::ConfigError;

/// Broad category of an [`MpesaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing caller input, detected before any I/O.
    InvalidArgument,
    /// Missing certificate or other static asset, or bad configuration.
    Configuration,
    /// Encryption of the initiator password failed.
    Crypto,
    /// The upstream host could not be reached.
    Network,
    /// The upstream host answered with a failure or an unusable body.
    Upstream,
}

/// Errors from M-Pesa API calls.
#[derive(Debug, thiserror::Error)]
pub enum MpesaError {
    /// A required request field is absent or blank.
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// The `environment` parameter is not `live` or `sandbox`.
    #[error(transparent)]
    InvalidEnvironment(#[from] EnvironmentError),

    /// Other caller input problem.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Sealing the initiator password failed.
    #[error("security credential: {0}")]
    Seal(#[from] SealError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The API returned a non-2xx status. `body` is the upstream payload,
    /// usually carrying `errorCode` and `errorMessage`.
    #[error("M-Pesa API {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The OAuth endpoint answered 2xx without an `access_token`.
    #[error("{endpoint} response did not include an access_token")]
    MissingAccessToken { endpoint: String },

    /// Reading an inbound callback body failed.
    #[error("failed to read callback body: {0}")]
    CallbackRead(#[from] std::io::Error),
}

impl MpesaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } | Self::InvalidEnvironment(_) | Self::InvalidArgument(_) => {
                ErrorKind::InvalidArgument
            }
            Self::Seal(e) if e.is_invalid_argument() => ErrorKind::InvalidArgument,
            Self::Seal(e) if e.is_crypto() => ErrorKind::Crypto,
            Self::Seal(_) | Self::Config(_) => ErrorKind::Configuration,
            Self::Http { .. } | Self::CallbackRead(_) => ErrorKind::Network,
            Self::ApiError { .. } | Self::Deserialization { .. } | Self::MissingAccessToken { .. } => {
                ErrorKind::Upstream
            }
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }
}
