//! # Seal Subcommand
//!
//! Prints the security credential for an initiator password. The password
//! is read from a named environment variable so it never lands in shell
//! history or the process list.

use anyhow::{bail, Context, Result};
use clap::Args;
use mpesa_client::{Environment, MpesaConfig};

/// Arguments for `mpesa seal`.
#[derive(Args, Debug)]
pub struct SealArgs {
    /// Target environment: `live` or `sandbox`.
    #[arg(long = "env", value_parser = crate::parse_environment)]
    pub environment: Environment,

    /// Name of the environment variable holding the initiator password.
    #[arg(long, value_name = "VAR", default_value = "MPESA_INITIATOR_PASSWORD")]
    pub password_env: String,
}

/// Execute the seal subcommand.
pub fn run_seal(args: &SealArgs, config: MpesaConfig) -> Result<u8> {
    let password = match std::env::var(&args.password_env) {
        Ok(p) if !p.is_empty() => p,
        Ok(_) => bail!("{} is empty", args.password_env),
        Err(_) => bail!("{} is not set", args.password_env),
    };
    let credential = seal(args.environment, &password, config)?;
    println!("{credential}");
    Ok(0)
}

fn seal(environment: Environment, password: &str, config: MpesaConfig) -> Result<String> {
    let cert_dir = config.certificate_dir.clone();
    let client = crate::build_client(config)?;
    let credential = client
        .security_credential(environment, password)
        .with_context(|| {
            format!(
                "failed to seal initiator password with certificate from {}",
                cert_dir.display()
            )
        })?;
    tracing::info!(%environment, "sealed initiator password");
    Ok(credential.into_string())
}
