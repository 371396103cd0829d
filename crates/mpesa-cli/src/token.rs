//! # Token Subcommand
//!
//! Exchanges the consumer key pair for an access token. The token itself is
//! only printed with `--show`.

use anyhow::{Context, Result};
use clap::Args;
use mpesa_client::{AccessToken, Environment, MpesaConfig};

use crate::CredentialArgs;

/// Arguments for `mpesa token`.
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Target environment: `live` or `sandbox`.
    #[arg(long = "env", value_parser = crate::parse_environment)]
    pub environment: Environment,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Print the bearer token.
    #[arg(long)]
    pub show: bool,
}

/// Execute the token subcommand.
pub async fn run_token(args: &TokenArgs, config: MpesaConfig) -> Result<u8> {
    let token = fetch(args, config).await?;
    println!("{}", summary(&token));
    if args.show {
        println!("{}", token.secret().expose());
    }
    Ok(0)
}

async fn fetch(args: &TokenArgs, config: MpesaConfig) -> Result<AccessToken> {
    let client = crate::build_client(config)?;
    client
        .access_token(args.environment, &args.credentials.credentials())
        .await
        .with_context(|| format!("token exchange against {} failed", args.environment))
}

fn summary(token: &AccessToken) -> String {
    match token.expires_in() {
        Some(secs) => format!("OK: token obtained (expires_in {secs}s)"),
        None => "OK: token obtained (expires_in unknown)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_reports_expiry_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth/v1/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "cli-token",
                "expires_in": "3599"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let args = TokenArgs {
            environment: Environment::Sandbox,
            credentials: CredentialArgs {
                consumer_key: "key".into(),
                consumer_secret: "secret".into(),
            },
            show: false,
        };
        let config = MpesaConfig::local_mock(&server.uri(), "certs").unwrap();
        let token = fetch(&args, config).await.unwrap();
        let line = summary(&token);
        assert_eq!(line, "OK: token obtained (expires_in 3599s)");
        assert!(!line.contains("cli-token"));
    }
}
