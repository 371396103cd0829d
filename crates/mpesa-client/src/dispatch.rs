//! The generic operation pipeline.
//!
//! Every operation runs the same steps, driven by its [`OperationSpec`]:
//! validate, parse the environment, derive credentials, fetch a token,
//! build the body and POST it. Validation failures happen before any
//! network I/O.

use std::time::Duration;

use mpesa_core::{is_blank, Environment, EnvironmentError};
use mpesa_crypto::CredentialSealer;
use serde_json::{Map, Value};

use crate::config::MpesaConfig;
use crate::credentials::{Credentials, Secret};
use crate::error::MpesaError;
use crate::operation::{
    CredentialMode, OperationKind, OperationSpec, BUSINESS_SHORT_CODE, CONSUMER_KEY,
    CONSUMER_SECRET, ENVIRONMENT, INITIATOR_PASSWORD, PASSKEY,
};
use crate::push::{push_password, push_timestamp, Clock};
use crate::token::TokenProvider;

/// Loosely typed operation parameters: upstream field names plus
/// `environment`, `consumer_key`, `consumer_secret`, `initiatorPassword`
/// and `LipaNaMpesaPasskey`.
pub type Params = Map<String, Value>;

#[derive(Debug, Clone)]
pub(crate) struct Dispatcher {
    http: reqwest::Client,
    config: MpesaConfig,
    sealer: CredentialSealer,
    tokens: TokenProvider,
    clock: Clock,
    timeout: Duration,
}

impl Dispatcher {
    pub(crate) fn new(
        http: reqwest::Client,
        config: MpesaConfig,
        sealer: CredentialSealer,
        clock: Clock,
    ) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let tokens = TokenProvider::new(http.clone(), config.clone(), timeout);
        Self {
            http,
            config,
            sealer,
            tokens,
            clock,
            timeout,
        }
    }

    pub(crate) fn config(&self) -> &MpesaConfig {
        &self.config
    }

    pub(crate) fn sealer(&self) -> &CredentialSealer {
        &self.sealer
    }

    pub(crate) fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }

    pub(crate) fn set_sealer(&mut self, sealer: CredentialSealer) {
        self.sealer = sealer;
    }

    pub(crate) fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
        self.tokens.set_timeout(timeout);
    }

    pub(crate) async fn invoke(
        &self,
        kind: OperationKind,
        params: &Params,
    ) -> Result<Value, MpesaError> {
        let spec = kind.spec();

        validate(spec, params)?;
        let environment = parse_environment(params)?;

        let derived = self.derive_credentials(spec, environment, params)?;

        let credentials = Credentials::new(
            param_text(params, CONSUMER_KEY),
            param_text(params, CONSUMER_SECRET),
        );
        let token = self.tokens.fetch_token(environment, &credentials).await?;

        let body = build_body(spec, params, derived);
        let path = spec.path(environment);
        let endpoint = format!("POST /{path}");
        let url = self.config.endpoint_url(environment, path)?;

        tracing::info!(operation = %kind, %environment, endpoint = %endpoint, "invoking M-Pesa operation");

        let resp = self
            .http
            .post(url)
            .bearer_auth(token.secret().expose())
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| MpesaError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            tracing::warn!(operation = %kind, %environment, status, "M-Pesa operation rejected");
            return Err(MpesaError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| MpesaError::Deserialization { endpoint, source: e })
    }

    fn derive_credentials(
        &self,
        spec: &OperationSpec,
        environment: Environment,
        params: &Params,
    ) -> Result<Vec<(&'static str, String)>, MpesaError> {
        match spec.credential {
            CredentialMode::None => Ok(Vec::new()),
            CredentialMode::SecurityCredential => {
                let password = Secret::new(param_text(params, INITIATOR_PASSWORD));
                let credential = self.sealer.seal(environment, password.expose())?;
                Ok(vec![("SecurityCredential", credential.into_string())])
            }
            CredentialMode::PushPassword => {
                let timestamp = push_timestamp((self.clock)());
                let passkey = Secret::new(param_text(params, PASSKEY));
                let password = push_password(
                    &param_text(params, BUSINESS_SHORT_CODE),
                    &passkey,
                    &timestamp,
                );
                Ok(vec![
                    ("Password", password.expose().to_string()),
                    ("Timestamp", timestamp),
                ])
            }
        }
    }
}

/// Check every required name in order and report the first blank one.
fn validate(spec: &OperationSpec, params: &Params) -> Result<(), MpesaError> {
    match spec
        .required_names()
        .find(|name| params.get(*name).map_or(true, is_blank))
    {
        Some(name) => Err(MpesaError::missing(name)),
        None => Ok(()),
    }
}

fn parse_environment(params: &Params) -> Result<Environment, MpesaError> {
    match params.get(ENVIRONMENT) {
        Some(Value::String(s)) => Ok(s.parse()?),
        Some(other) => Err(EnvironmentError(other.to_string()).into()),
        None => Err(MpesaError::missing(ENVIRONMENT)),
    }
}

fn build_body(
    spec: &OperationSpec,
    params: &Params,
    derived: Vec<(&'static str, String)>,
) -> Map<String, Value> {
    let mut body = Map::new();
    for field in spec.fields {
        let value = match params.get(field.name) {
            Some(Value::Null) | None => Value::String(String::new()),
            Some(v) => v.clone(),
        };
        body.insert(field.name.to_string(), value);
    }
    if spec.credential == CredentialMode::PushPassword {
        if let Some(short_code) = params.get(BUSINESS_SHORT_CODE) {
            body.insert(BUSINESS_SHORT_CODE.to_string(), short_code.clone());
        }
    }
    for (name, value) in spec.fixed_fields {
        body.insert((*name).to_string(), Value::String((*value).to_string()));
    }
    for (name, value) in derived {
        body.insert(name.to_string(), Value::String(value));
    }
    body
}

fn param_text(params: &Params, name: &str) -> String {
    params.get(name).map(value_text).unwrap_or_default()
}

/// Text form of a scalar parameter. Strings are taken as-is; numbers and
/// booleans use their JSON spelling.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
