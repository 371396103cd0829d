//! # Sealing Error Types
//!
//! Structured errors for credential sealing. Variants fall into three
//! groups that callers surface differently: bad caller input, missing or
//! broken static assets, and failures inside the RSA primitive.

use std::path::PathBuf;

use mpesa_core::Environment;
use thiserror::Error;

/// Errors from [`CredentialSealer::seal`](crate::CredentialSealer::seal).
#[derive(Error, Debug)]
pub enum SealError {
    /// The initiator password was empty.
    #[error("initiator password must not be empty")]
    EmptyPassword,

    /// The certificate file for the environment does not exist.
    #[error("{environment} certificate not found at {}", path.display())]
    CertificateNotFound {
        environment: Environment,
        path: PathBuf,
    },

    /// The certificate store has no certificate for the environment.
    #[error("no {0} certificate configured")]
    CertificateMissing(Environment),

    /// The certificate exists but could not be read or parsed.
    #[error("{environment} certificate is unreadable: {reason}")]
    CertificateUnreadable {
        environment: Environment,
        reason: String,
    },

    /// The certificate's public key is not an RSA key.
    #[error("{0} certificate does not carry an RSA public key")]
    NotRsa(Environment),

    /// The password exceeds what one PKCS#1 v1.5 block can carry.
    #[error("initiator password is {len} bytes; the {environment} key accepts at most {max}")]
    PlaintextTooLong {
        environment: Environment,
        len: usize,
        max: usize,
    },

    /// The RSA primitive rejected the input.
    #[error("RSA encryption failed: {0}")]
    Encryption(String),
}

impl SealError {
    /// True for errors caused by caller input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::EmptyPassword)
    }

    /// True for errors caused by missing or malformed certificates.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::CertificateNotFound { .. }
                | Self::CertificateMissing(_)
                | Self::CertificateUnreadable { .. }
                | Self::NotRsa(_)
        )
    }

    /// True for failures of the encryption step itself.
    pub fn is_crypto(&self) -> bool {
        matches!(self, Self::PlaintextTooLong { .. } | Self::Encryption(_))
    }
}
