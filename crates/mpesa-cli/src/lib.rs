//! # mpesa-cli -- Operator CLI for the M-Pesa Client
//!
//! Provides the `mpesa` command-line interface over `mpesa-client`.
//!
//! ## Subcommands
//!
//! - `mpesa seal` -- Seal an initiator password into a security credential.
//! - `mpesa token` -- Check that a consumer key pair can obtain a token.
//! - `mpesa invoke` -- Run one operation from a JSON parameter file.
//! - `mpesa ack` -- Print a callback acknowledgement body.
//! - `mpesa operations` -- List the operations and their paths.
//!
//! ```bash
//! export MPESA_CONSUMER_KEY=... MPESA_CONSUMER_SECRET=...
//! mpesa token --env sandbox
//! mpesa invoke account_balance --params balance.json
//! ```
//!
//! ## Exit Codes
//!
//! `0` on success, `1` on runtime failure, `2` on invalid input.

pub mod ack;
pub mod catalog;
pub mod invoke;
pub mod seal;
pub mod token;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use mpesa_client::{Credentials, Environment, MpesaConfig, PaymentClient};

/// Consumer key pair, from flags or the environment.
#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    /// Daraja app consumer key.
    #[arg(long, env = "MPESA_CONSUMER_KEY", hide_env_values = true)]
    pub consumer_key: String,
    /// Daraja app consumer secret.
    #[arg(long, env = "MPESA_CONSUMER_SECRET", hide_env_values = true)]
    pub consumer_secret: String,
}

impl CredentialArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.consumer_key.clone(), self.consumer_secret.as_str())
    }
}

/// clap value parser for `--env`.
pub fn parse_environment(s: &str) -> Result<Environment, String> {
    s.parse::<Environment>().map_err(|e| e.to_string())
}

/// Load configuration from the environment, optionally overriding the
/// certificate directory.
pub fn load_config(cert_dir: Option<&Path>) -> Result<MpesaConfig> {
    let mut config = MpesaConfig::from_env().context("invalid M-Pesa configuration")?;
    if let Some(dir) = cert_dir {
        config.certificate_dir = dir.to_path_buf();
    }
    Ok(config)
}

pub fn build_client(config: MpesaConfig) -> Result<PaymentClient> {
    PaymentClient::new(config).context("failed to build M-Pesa client")
}
