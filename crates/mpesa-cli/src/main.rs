//! # mpesa CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mpesa_client::{ErrorKind, MpesaError};
use tracing_subscriber::EnvFilter;

use mpesa_cli::ack::{run_ack, AckArgs};
use mpesa_cli::catalog::run_operations;
use mpesa_cli::invoke::{run_invoke, InvokeArgs};
use mpesa_cli::load_config;
use mpesa_cli::seal::{run_seal, SealArgs};
use mpesa_cli::token::{run_token, TokenArgs};

/// M-Pesa Daraja operator CLI.
///
/// Seals initiator credentials, checks consumer keys, runs payment
/// operations and prints callback acknowledgements. Base URLs, the
/// certificate directory and the timeout come from `MPESA_*` variables.
#[derive(Parser, Debug)]
#[command(name = "mpesa", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding ProductionCertificate.cer and SandboxCertificate.cer.
    /// Overrides MPESA_CERT_DIR.
    #[arg(long, global = true)]
    cert_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Seal an initiator password into a security credential.
    Seal(SealArgs),

    /// Exchange the consumer key pair for an access token.
    Token(TokenArgs),

    /// Run one operation with parameters from a JSON file.
    Invoke(InvokeArgs),

    /// Print a callback acknowledgement body.
    Ack(AckArgs),

    /// List operations, their paths and required fields.
    Operations,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli.command, cli.cert_dir).await;

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            let invalid_input = e
                .downcast_ref::<MpesaError>()
                .is_some_and(|m| m.kind() == ErrorKind::InvalidArgument);
            ExitCode::from(if invalid_input { 2 } else { 1 })
        }
    }
}

async fn run(command: Commands, cert_dir: Option<PathBuf>) -> anyhow::Result<u8> {
    match command {
        Commands::Ack(args) => run_ack(&args),
        Commands::Operations => run_operations(),
        Commands::Seal(args) => run_seal(&args, load_config(cert_dir.as_deref())?),
        Commands::Token(args) => run_token(&args, load_config(cert_dir.as_deref())?).await,
        Commands::Invoke(args) => run_invoke(&args, load_config(cert_dir.as_deref())?).await,
    }
}
