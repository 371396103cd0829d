//! OAuth token exchange.
//!
//! `GET {base}/oauth/v1/generate?grant_type=client_credentials` with HTTP
//! Basic authentication over the consumer key pair. One attempt per call.

use std::time::Duration;

use chrono::Utc;
use mpesa_core::Environment;
use serde::Deserialize;

use crate::config::MpesaConfig;
use crate::credentials::{AccessToken, Credentials};
use crate::error::MpesaError;

const OAUTH_PATH: &str = "oauth/v1/generate";

/// Body of a successful OAuth response. `expires_in` arrives as a string
/// (`"3599"`) from Daraja but is accepted as a number too.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<serde_json::Value>,
}

/// Exchanges consumer credentials for bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    http: reqwest::Client,
    config: MpesaConfig,
    timeout: Duration,
}

impl TokenProvider {
    pub(crate) fn new(http: reqwest::Client, config: MpesaConfig, timeout: Duration) -> Self {
        Self {
            http,
            config,
            timeout,
        }
    }

    pub(crate) fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Fetch a fresh access token for `environment`.
    ///
    /// # Errors
    ///
    /// - [`MpesaError::InvalidArgument`] if the key or secret is empty.
    /// - [`MpesaError::Http`] on transport failure.
    /// - [`MpesaError::ApiError`], [`MpesaError::Deserialization`] or
    ///   [`MpesaError::MissingAccessToken`] when the server answers but
    ///   does not hand out a token.
    pub async fn fetch_token(
        &self,
        environment: Environment,
        credentials: &Credentials,
    ) -> Result<AccessToken, MpesaError> {
        if credentials.consumer_key().is_empty() || credentials.consumer_secret().is_empty() {
            return Err(MpesaError::InvalidArgument(
                "consumer key and consumer secret are required".into(),
            ));
        }

        let endpoint = format!("GET /{OAUTH_PATH}");
        let url = self.config.endpoint_url(environment, OAUTH_PATH)?;

        tracing::debug!(%environment, endpoint = %endpoint, "requesting access token");

        let resp = self
            .http
            .get(url)
            .query(&[("grant_type", "client_credentials")])
            .basic_auth(
                credentials.consumer_key(),
                Some(credentials.consumer_secret().expose()),
            )
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
            tracing::warn!(%environment, status, "OAuth endpoint rejected credentials");
            return Err(MpesaError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        let parsed: TokenResponse =
            resp.json()
                .await
                .map_err(|e| MpesaError::Deserialization {
                    endpoint: endpoint.clone(),
                    source: e,
                })?;

        let value = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(MpesaError::MissingAccessToken { endpoint })?;

        Ok(AccessToken::new(
            value,
            Utc::now(),
            parsed.expires_in.as_ref().and_then(parse_expires_in),
        ))
    }
}

fn parse_expires_in(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expires_in_accepts_string_and_number() {
        assert_eq!(parse_expires_in(&json!("3599")), Some(3599));
        assert_eq!(parse_expires_in(&json!(3599)), Some(3599));
        assert_eq!(parse_expires_in(&json!("soon")), None);
        assert_eq!(parse_expires_in(&json!(null)), None);
    }

    #[test]
    fn token_response_tolerates_missing_fields() {
        let parsed: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.access_token.is_none());
        assert!(parsed.expires_in.is_none());
    }
}
