//! # mpesa-client -- Typed Rust client for the M-Pesa Daraja API
//!
//! Covers the nine payment operations of the Daraja REST API:
//! - **C2B** simulate and URL registration
//! - **B2C** and **B2B** payments
//! - **Account balance** and **transaction status** queries
//! - **Reversal**
//! - **STK push** (Lipa Na M-Pesa Online) and its status query
//!
//! Plus the **callback** surface: hand inbound bodies over verbatim and build
//! the standard acknowledgement.
//!
//! ## Architecture
//!
//! Every operation is a row in a static table ([`operation`]) and runs
//! through one pipeline: validate, seal or derive credentials, fetch a fresh
//! OAuth token, POST. Nothing is cached between calls and nothing is
//! retried. Callers use either a loose [`Params`] object keyed by upstream
//! field names or one of the typed request structs in [`request`].

pub mod callback;
pub mod config;
pub mod credentials;
mod dispatch;
pub mod error;
pub mod operation;
pub mod push;
pub mod request;
pub mod token;

pub use callback::{acknowledge, receive_callback, CallbackPayload, StandardAck};
pub use config::MpesaConfig;
pub use credentials::{AccessToken, Credentials, Secret};
pub use dispatch::Params;
pub use error::{ErrorKind, MpesaError};
pub use mpesa_core::Environment;
pub use mpesa_crypto::{CertificateStore, SecurityCredential};
pub use operation::OperationKind;
pub use request::OperationRequest;

use std::time::Duration;

use mpesa_crypto::CredentialSealer;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::push::Clock;
use crate::request::{
    AccountBalanceRequest, B2bPaymentRequest, B2cPaymentRequest, C2bSimulateRequest,
    RegisterUrlRequest, ReversalRequest, StkPushQueryRequest, StkPushRequest,
    TransactionStatusRequest,
};

/// Top-level M-Pesa client.
///
/// Cheap to clone; clones share the pooled HTTP connection.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    dispatcher: Dispatcher,
}

impl PaymentClient {
    /// Create a client from configuration. Certificates are read from
    /// `config.certificate_dir` on each sealing call.
    pub fn new(config: MpesaConfig) -> Result<Self, MpesaError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MpesaError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let sealer = CredentialSealer::new(CertificateStore::from_dir(
            config.certificate_dir.clone(),
        ));

        Ok(Self {
            dispatcher: Dispatcher::new(http, config, sealer, push::system_clock),
        })
    }

    /// Replace the certificate source, e.g. with in-memory certificates.
    pub fn with_certificates(mut self, certificates: CertificateStore) -> Self {
        self.dispatcher
            .set_sealer(CredentialSealer::new(certificates));
        self
    }

    /// Replace the clock used for STK push timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.dispatcher.set_clock(clock);
        self
    }

    /// Apply `timeout` to every request made by the returned client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.dispatcher.set_timeout(timeout);
        self
    }

    pub fn config(&self) -> &MpesaConfig {
        self.dispatcher.config()
    }

    /// Run `kind` with loosely typed parameters and return the decoded
    /// response body.
    pub async fn invoke(&self, kind: OperationKind, params: &Params) -> Result<Value, MpesaError> {
        self.dispatcher.invoke(kind, params).await
    }

    /// Run a typed request.
    pub async fn execute<R: OperationRequest>(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &R,
    ) -> Result<Value, MpesaError> {
        let params = request.to_params(environment, credentials)?;
        self.dispatcher.invoke(R::KIND, &params).await
    }

    pub async fn c2b_simulate(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &C2bSimulateRequest,
    ) -> Result<Value, MpesaError> {
        self.execute(environment, credentials, request).await
    }

    pub async fn b2c_payment(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &B2cPaymentRequest,
    ) -> Result<Value, MpesaError> {
        self.execute(environment, credentials, request).await
    }

    pub async fn b2b_payment(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &B2bPaymentRequest,
    ) -> Result<Value, MpesaError> {
        self.execute(environment, credentials, request).await
    }

    pub async fn account_balance(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &AccountBalanceRequest,
    ) -> Result<Value, MpesaError> {
        self.execute(environment, credentials, request).await
    }

    pub async fn transaction_status(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &TransactionStatusRequest,
    ) -> Result<Value, MpesaError> {
        self.execute(environment, credentials, request).await
    }

    pub async fn reversal(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &ReversalRequest,
    ) -> Result<Value, MpesaError> {
        self.execute(environment, credentials, request).await
    }

    pub async fn stk_push(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &StkPushRequest,
    ) -> Result<Value, MpesaError> {
        self.execute(environment, credentials, request).await
    }

    pub async fn stk_push_query(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &StkPushQueryRequest,
    ) -> Result<Value, MpesaError> {
        self.execute(environment, credentials, request).await
    }

    pub async fn register_url(
        &self,
        environment: Environment,
        credentials: &Credentials,
        request: &RegisterUrlRequest,
    ) -> Result<Value, MpesaError> {
        self.execute(environment, credentials, request).await
    }

    /// Seal an initiator password for `environment` without calling the API.
    pub fn security_credential(
        &self,
        environment: Environment,
        initiator_password: &str,
    ) -> Result<SecurityCredential, MpesaError> {
        Ok(self.dispatcher.sealer().seal(environment, initiator_password)?)
    }

    /// Fetch a fresh access token.
    pub async fn access_token(
        &self,
        environment: Environment,
        credentials: &Credentials,
    ) -> Result<AccessToken, MpesaError> {
        self.dispatcher
            .tokens()
            .fetch_token(environment, credentials)
            .await
    }
}
