//! # Certificate Store
//!
//! Resolves the public-key certificate for an [`Environment`]. Safaricom
//! publishes the certificates as `.cer` files; both PEM and DER encodings
//! are accepted. A missing certificate is a configuration error, never a
//! reason to fall back to the other environment.

use std::path::{Path, PathBuf};

use mpesa_core::Environment;
use openssl::x509::X509;

use crate::error::SealError;

#[derive(Debug, Clone)]
enum Source {
    Directory(PathBuf),
    InMemory {
        live: Option<Vec<u8>>,
        sandbox: Option<Vec<u8>>,
    },
}

/// Location of the two environment certificates.
#[derive(Debug, Clone)]
pub struct CertificateStore {
    source: Source,
}

impl CertificateStore {
    /// Certificates live in `dir` under their standard file names.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(dir.into()),
        }
    }

    /// Certificates are held in memory. An environment without bytes
    /// reports [`SealError::CertificateMissing`] when sealed for.
    pub fn in_memory(live: Option<Vec<u8>>, sandbox: Option<Vec<u8>>) -> Self {
        Self {
            source: Source::InMemory { live, sandbox },
        }
    }

    /// Path of the certificate file for `environment`, if directory-backed.
    pub fn path_for(&self, environment: Environment) -> Option<PathBuf> {
        match &self.source {
            Source::Directory(dir) => Some(dir.join(environment.certificate_file_name())),
            Source::InMemory { .. } => None,
        }
    }

    /// Read and parse the certificate for `environment`.
    ///
    /// The file is read on every call.
    pub fn load(&self, environment: Environment) -> Result<X509, SealError> {
        let bytes = match &self.source {
            Source::Directory(dir) => read_certificate(dir, environment)?,
            Source::InMemory { live, sandbox } => {
                let slot = match environment {
                    Environment::Live => live,
                    Environment::Sandbox => sandbox,
                };
                slot.clone()
                    .ok_or(SealError::CertificateMissing(environment))?
            }
        };
        parse_certificate(&bytes, environment)
    }
}

fn read_certificate(dir: &Path, environment: Environment) -> Result<Vec<u8>, SealError> {
    let path = dir.join(environment.certificate_file_name());
    match std::fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SealError::CertificateNotFound { environment, path })
        }
        Err(e) => Err(SealError::CertificateUnreadable {
            environment,
            reason: format!("{}: {e}", path.display()),
        }),
    }
}

/// Parse PEM first, then DER.
fn parse_certificate(bytes: &[u8], environment: Environment) -> Result<X509, SealError> {
    X509::from_pem(bytes)
        .or_else(|_| X509::from_der(bytes))
        .map_err(|e| SealError::CertificateUnreadable {
            environment,
            reason: e.to_string(),
        })
}
