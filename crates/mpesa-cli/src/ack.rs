//! # Ack Subcommand
//!
//! Prints the acknowledgement body a callback endpoint returns to Daraja.
//! Useful for stub endpoints and smoke tests.

use anyhow::Result;
use clap::Args;
use mpesa_client::acknowledge;

/// Arguments for `mpesa ack`.
#[derive(Args, Debug)]
pub struct AckArgs {
    /// Print the rejection body instead of the acceptance body.
    #[arg(long)]
    pub reject: bool,
}

/// Execute the ack subcommand.
pub fn run_ack(args: &AckArgs) -> Result<u8> {
    println!("{}", acknowledge(!args.reject).to_json());
    Ok(0)
}
