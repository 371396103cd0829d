//! # Credential Sealer
//!
//! `SecurityCredential = base64(RSA_PKCS1_v1_5(password, certificate))`.
//!
//! PKCS#1 v1.5 encryption pads the plaintext with fresh random bytes, so two
//! seals of the same password differ byte-for-byte while decrypting to the
//! same password. The upstream network only ever decrypts, so any of them
//! is accepted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use mpesa_core::Environment;
use openssl::rsa::Padding;
use zeroize::Zeroizing;

use crate::certificate::CertificateStore;
use crate::error::SealError;

/// PKCS#1 v1.5 encryption overhead in bytes.
const PKCS1_PADDING_OVERHEAD: usize = 11;

/// An initiator password sealed for one environment, base64-encoded.
///
/// The value authenticates payment operations, so `Debug` redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct SecurityCredential(String);

impl SecurityCredential {
    /// The base64 text sent as `SecurityCredential` in request bodies.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for SecurityCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecurityCredential")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// Encrypts initiator passwords under the environment certificate.
#[derive(Debug, Clone)]
pub struct CredentialSealer {
    certificates: CertificateStore,
}

impl CredentialSealer {
    pub fn new(certificates: CertificateStore) -> Self {
        Self { certificates }
    }

    pub fn certificates(&self) -> &CertificateStore {
        &self.certificates
    }

    /// Seal `initiator_password` for `environment`.
    ///
    /// # Errors
    ///
    /// - [`SealError::EmptyPassword`] for an empty password.
    /// - Configuration variants when the certificate is missing, unreadable
    ///   or not RSA.
    /// - [`SealError::PlaintextTooLong`] / [`SealError::Encryption`] when the
    ///   RSA step fails.
    pub fn seal(
        &self,
        environment: Environment,
        initiator_password: &str,
    ) -> Result<SecurityCredential, SealError> {
        if initiator_password.is_empty() {
            return Err(SealError::EmptyPassword);
        }

        let certificate = self.certificates.load(environment)?;
        let public_key = certificate
            .public_key()
            .map_err(|e| SealError::CertificateUnreadable {
                environment,
                reason: e.to_string(),
            })?;
        let rsa = public_key
            .rsa()
            .map_err(|_| SealError::NotRsa(environment))?;

        let key_size = rsa.size() as usize;
        let max = key_size.saturating_sub(PKCS1_PADDING_OVERHEAD);
        let plaintext = initiator_password.as_bytes();
        if plaintext.len() > max {
            return Err(SealError::PlaintextTooLong {
                environment,
                len: plaintext.len(),
                max,
            });
        }

        let mut ciphertext = Zeroizing::new(vec![0u8; key_size]);
        let written = rsa
            .public_encrypt(plaintext, &mut ciphertext, Padding::PKCS1)
            .map_err(|e| SealError::Encryption(e.to_string()))?;

        tracing::debug!(%environment, key_bits = key_size * 8, "sealed initiator password");

        Ok(SecurityCredential(STANDARD.encode(&ciphertext[..written])))
    }
}
