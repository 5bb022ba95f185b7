//! k8s-oidc-helper
//!
//! Single-binary CLI that:
//! 1. Resolves the Google OAuth client credentials (flags, env, or JSON file)
//! 2. Sends the user through Google's consent screen
//! 3. Exchanges the pasted code for an ID token and refresh token
//! 4. Prints a kubeconfig `oidc` user entry, or merges it into a kubeconfig

mod config;
mod error;
mod flow;
mod landing;

use anyhow::{Context, Result};
use clap::Parser;
use google_auth::Endpoints;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Args;
use crate::flow::{Flow, OutputMode};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the printed kubeconfig can be piped
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    if args.version {
        println!("k8s-oidc-helper v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let credentials = config::resolve_credentials(&args).await?;
    let mode = if args.write {
        OutputMode::Write(config::resolve_kubeconfig_path(args.file.as_deref())?)
    } else {
        OutputMode::Print
    };
    info!(client_id = %credentials.client_id, ?mode, "configuration resolved");

    let flow = Flow {
        http: reqwest::Client::new(),
        endpoints: Endpoints::google(),
        credentials,
        open_browser: args.open,
        mode,
        landing_addr: Some(landing::LANDING_ADDR.to_string()),
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    flow.run(stdin, &mut std::io::stdout())
        .await
        .context("k8s-oidc-helper failed")
}
