//! Command line and environment configuration
//!
//! Every flag can also be set through `K8S_OIDC_HELPER_<FLAG>`, with dashes
//! turned into underscores. Flags beat env vars. A `--config` file beats both
//! for the client ID and secret.

use std::path::{Path, PathBuf};

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use google_auth::ClientCredentials;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "k8s-oidc-helper",
    about = "Generate a kubeconfig user entry from a Google OpenID Connect login",
    disable_version_flag = true
)]
pub struct Args {
    /// Print version and exit
    #[arg(
        short = 'v',
        long,
        env = "K8S_OIDC_HELPER_VERSION",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        default_value = "false",
        default_missing_value = "true",
        num_args = 0..=1,
        require_equals = true
    )]
    pub version: bool,

    /// Open the oauth approval URL in the browser
    #[arg(
        short,
        long,
        env = "K8S_OIDC_HELPER_OPEN",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        default_value = "true",
        default_missing_value = "true",
        num_args = 0..=1,
        require_equals = true
    )]
    pub open: bool,

    /// The ClientID for the application
    #[arg(long, env = "K8S_OIDC_HELPER_CLIENT_ID")]
    pub client_id: Option<String>,

    /// The ClientSecret for the application
    #[arg(long, env = "K8S_OIDC_HELPER_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Path to a json file containing your application's ClientID and
    /// ClientSecret. Supersedes the --client-id and --client-secret flags.
    #[arg(short, long, env = "K8S_OIDC_HELPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write config to file. Merges in the specified file
    #[arg(
        short,
        long,
        env = "K8S_OIDC_HELPER_WRITE",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        default_value = "false",
        default_missing_value = "true",
        num_args = 0..=1,
        require_equals = true
    )]
    pub write: bool,

    /// The file to write to. If not specified, `~/.kube/config` is used
    #[arg(long, env = "K8S_OIDC_HELPER_FILE")]
    pub file: Option<String>,
}

const MISSING_CLIENT_ID: &str =
    "a client ID is required: pass --client-id, set K8S_OIDC_HELPER_CLIENT_ID, or use --config";

/// Resolve the OAuth client credentials.
///
/// A config file, when given, supplies both values and the flags are ignored.
/// The client ID must end up non-empty.
pub async fn resolve_credentials(args: &Args) -> common::Result<ClientCredentials> {
    let credentials = match &args.config {
        Some(path) if !path.as_os_str().is_empty() => load_file(path).await?,
        _ => {
            debug!("using client credentials from flags/environment");
            ClientCredentials::new(
                args.client_id.clone().unwrap_or_default(),
                args.client_secret.clone().unwrap_or_default(),
            )
        }
    };

    if credentials.client_id.trim().is_empty() {
        return Err(common::Error::Config(MISSING_CLIENT_ID.into()));
    }

    Ok(credentials)
}

async fn load_file(path: &Path) -> common::Result<ClientCredentials> {
    ClientCredentials::load(path).await.map_err(|e| {
        common::Error::Config(format!("Error reading config file {}: {e}", path.display()))
    })
}

/// Resolve the kubeconfig written in write mode.
///
/// `--file` may start with `~`; without it the default `~/.kube/config` is used.
pub fn resolve_kubeconfig_path(file: Option<&str>) -> common::Result<PathBuf> {
    match file {
        Some(file) if !file.is_empty() => Ok(PathBuf::from(shellexpand::tilde(file).as_ref())),
        _ => kubeconfig::default_path().map_err(|e| {
            common::Error::Config(format!("could not resolve the kubeconfig path: {e}"))
        }),
    }
}

/// Serializes tests that read or mutate process environment variables.
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
