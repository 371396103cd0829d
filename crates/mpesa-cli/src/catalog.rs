//! # Operations Subcommand
//!
//! Lists every operation with its paths, credential mode and required
//! fields.

use anyhow::Result;
use mpesa_client::operation::CredentialMode;
use mpesa_client::{Environment, OperationKind};

/// Execute the operations subcommand.
pub fn run_operations() -> Result<u8> {
    for kind in OperationKind::ALL {
        println!("{}", describe(kind));
    }
    Ok(0)
}

fn describe(kind: OperationKind) -> String {
    let spec = kind.spec();
    let credential = match spec.credential {
        CredentialMode::None => "none",
        CredentialMode::SecurityCredential => "security credential",
        CredentialMode::PushPassword => "push password",
    };
    let required: Vec<&str> = spec
        .fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name)
        .chain(spec.credential.inputs().iter().copied())
        .collect();
    format!(
        "{kind}\n  sandbox:    /{}\n  live:       /{}\n  credential: {credential}\n  required:   {}",
        spec.path(Environment::Sandbox),
        spec.path(Environment::Live),
        required.join(", ")
    )
}
