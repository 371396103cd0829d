//! # Invoke Subcommand
//!
//! Runs one operation with parameters read from a JSON object file, keyed
//! by the upstream field names:
//!
//! ```json
//! {
//!   "Initiator": "testapi",
//!   "initiatorPassword": "...",
//!   "PartyA": "600000",
//!   "IdentifierType": "4",
//!   "QueueTimeOutURL": "https://example.com/timeout",
//!   "ResultURL": "https://example.com/result"
//! }
//! ```
//!
//! `environment`, `consumer_key` and `consumer_secret` may be given in the
//! file; otherwise they come from `--env` and the credential flags or
//! their environment variables.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use mpesa_client::{Environment, MpesaConfig, OperationKind, Params};
use serde_json::Value;

/// Arguments for `mpesa invoke`.
#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Operation name, as listed by `mpesa operations`.
    #[arg(value_parser = parse_operation)]
    pub operation: OperationKind,

    /// JSON file with the operation parameters.
    #[arg(long, value_name = "FILE")]
    pub params: PathBuf,

    /// Target environment; overrides `environment` in the file.
    #[arg(long = "env", value_parser = crate::parse_environment)]
    pub environment: Option<Environment>,

    /// Consumer key, used when the file has none.
    #[arg(long, env = "MPESA_CONSUMER_KEY", hide_env_values = true)]
    pub consumer_key: Option<String>,

    /// Consumer secret, used when the file has none.
    #[arg(long, env = "MPESA_CONSUMER_SECRET", hide_env_values = true)]
    pub consumer_secret: Option<String>,
}

fn parse_operation(s: &str) -> Result<OperationKind, String> {
    s.parse()
}

/// Execute the invoke subcommand.
pub async fn run_invoke(args: &InvokeArgs, config: MpesaConfig) -> Result<u8> {
    let params = load_params(args)?;
    let client = crate::build_client(config)?;
    let response = client.invoke(args.operation, &params).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("failed to render response")?
    );
    Ok(0)
}

fn load_params(args: &InvokeArgs) -> Result<Params> {
    let mut params = read_params(&args.params)?;

    if let Some(env) = args.environment {
        params.insert("environment".into(), Value::String(env.as_str().into()));
    }
    for (name, fallback) in [
        ("consumer_key", &args.consumer_key),
        ("consumer_secret", &args.consumer_secret),
    ] {
        if params.contains_key(name) {
            continue;
        }
        if let Some(value) = fallback {
            params.insert(name.into(), Value::String(value.clone()));
        }
    }
    Ok(params)
}

fn read_params(path: &Path) -> Result<Params> {
    if !path.exists() {
        bail!("parameter file not found: {}", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read parameter file: {}", path.display()))?;
    match serde_json::from_str::<Value>(&content)
        .with_context(|| format!("failed to parse parameter file: {}", path.display()))?
    {
        Value::Object(map) => Ok(map),
        _ => bail!("parameter file must hold a JSON object: {}", path.display()),
    }
}
