//! The login flow: consent URL, pasted code, tokens, email, kubeconfig entry

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use google_auth::{ClientCredentials, Endpoints, ISSUER_URL};
use kubeconfig::{AuthInfo, Kubeconfig, OidcConfig};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};
use url::Url;

use crate::error::Error;
use crate::landing;

/// What to do with the generated user entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Print the partial kubeconfig for manual merging.
    Print,
    /// Merge into the kubeconfig at this path.
    Write(PathBuf),
}

pub struct Flow {
    pub http: reqwest::Client,
    pub endpoints: Endpoints,
    pub credentials: ClientCredentials,
    pub open_browser: bool,
    pub mode: OutputMode,
    /// Where the landing page listens while the flow waits for the code.
    /// `None` runs without it.
    pub landing_addr: Option<String>,
}

impl Flow {
    /// Run the flow, reading the code from `input` and talking to the user on `out`.
    ///
    /// The landing page is up for the duration of the run and is stopped
    /// before this returns, whatever the outcome.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let landing = match &self.landing_addr {
            Some(addr) => landing::start(addr).await,
            None => None,
        };

        let result = self.login(input, out).await;

        if let Some(handle) = landing {
            handle.shutdown().await;
        }
        result
    }

    async fn login<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let client_id = &self.credentials.client_id;
        let auth_url = google_auth::build_authorization_url(&self.endpoints, client_id)
            .context("building authorization URL")?;
        self.launch_browser(&auth_url, out)?;

        write!(out, "Enter the code Google gave you: ")?;
        out.flush()?;
        let code = read_code(input).await?;

        let tokens = google_auth::exchange_code(
            &self.http,
            &self.endpoints,
            &self.credentials,
            &code,
        )
        .await
        .context("Error getting tokens")?
        .into_oidc()?;

        let email = google_auth::fetch_email(&self.http, &self.endpoints, &tokens.access_token)
            .await
            .context("Error getting user email")?;
        info!(%email, "authenticated");

        let auth_info = AuthInfo::oidc(OidcConfig {
            client_id: client_id.clone(),
            client_secret: self.credentials.client_secret.expose().clone(),
            id_token: tokens.id_token,
            refresh_token: tokens.refresh_token,
            idp_issuer_url: ISSUER_URL.to_string(),
        });
        let partial = Kubeconfig::with_user(email, auth_info);

        match &self.mode {
            OutputMode::Print => {
                let yaml = partial.to_yaml().context("Unexpected error")?;
                writeln!(out, "\n# Add the following to your ~/.kube/config")?;
                write!(out, "{yaml}")?;
            }
            OutputMode::Write(path) => {
                kubeconfig::merge_into_file(&partial, path)
                    .await
                    .context("Could not merge configuration")?;
                writeln!(out, "Configuration has been written to {}", path.display())?;
            }
        }
        Ok(())
    }

    fn launch_browser<W: Write>(&self, auth_url: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Open this url in your browser: {auth_url}\n")?;
        if self.open_browser
            && let Err(e) = open::that_detached(auth_url)
        {
            warn!(error = %e, "could not open the browser");
        }
        Ok(())
    }
}

/// Read one line from `input` and turn it into an authorization code.
pub async fn read_code<R>(mut input: R) -> crate::error::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Err(Error::InputClosed);
    }
    normalize_code(&line).ok_or(Error::EmptyCode)
}

/// Accept either the bare code or the whole redirect URL it came on.
///
/// A redirect URL without a `code` parameter (consent denied) yields `None`.
fn normalize_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(url) = Url::parse(trimmed) else {
        return Some(trimmed.to_string());
    };
    if !matches!(url.scheme(), "http" | "https") {
        return Some(trimmed.to_string());
    }
    let code = url.query_pairs().find(|(key, _)| key == "code")?.1;
    Some(code.into_owned()).filter(|code| !code.is_empty())
}
