//! # mpesa-crypto -- Credential Sealing for the M-Pesa Client
//!
//! Several Daraja operations (B2C, B2B, reversal, balance and status
//! queries) authenticate the *initiator* (the API operator on whose behalf
//! the payment runs) with a **security credential**: the initiator's
//! password encrypted under the environment's public-key certificate and
//! encoded in base64.
//!
//! - [`CertificateStore`] locates the two environment certificates, either
//!   in a directory (`ProductionCertificate.cer`, `SandboxCertificate.cer`)
//!   or in memory.
//! - [`CredentialSealer`] encrypts with RSA PKCS#1 v1.5 and encodes the
//!   ciphertext.
//!
//! ## Security Invariant
//!
//! Nothing is cached. The certificate is read on every call and the
//! credential is recomputed on every call. Passwords and credentials never
//! reach a log line or an error message.

pub mod certificate;
pub mod error;
pub mod seal;

pub use certificate::CertificateStore;
pub use error::SealError;
pub use seal::{CredentialSealer, SecurityCredential};
