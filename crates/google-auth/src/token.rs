//! Authorization code exchange
//!
//! POSTs the pasted code to the token endpoint with the client credentials.
//! The offline-access and forced-consent options are repeated in the body,
//! the same way they were sent on the consent URL.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::constants::Endpoints;
use crate::credentials::ClientCredentials;
use crate::error::{Error, Result};

/// Response from the token endpoint.
///
/// Google leaves `refresh_token` out when consent was not forced; it then
/// reads as empty. `id_token` is only present when `openid` was granted.
#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// Seconds until the access token expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Tokens of a response that carried an ID token.
#[derive(Debug, Clone)]
pub struct OidcTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub id_token: String,
}

impl TokenResponse {
    /// Require the ID token the kubeconfig entry is built around.
    pub fn into_oidc(self) -> Result<OidcTokens> {
        match self.id_token {
            Some(id_token) if !id_token.is_empty() => Ok(OidcTokens {
                access_token: self.access_token,
                refresh_token: self.refresh_token,
                id_token,
            }),
            _ => {
                error!("missing id_token, require scope=openid");
                Err(Error::MissingIdToken)
            }
        }
    }
}

/// Exchange an authorization code for tokens.
pub async fn exchange_code(
    client: &reqwest::Client,
    endpoints: &Endpoints,
    credentials: &ClientCredentials,
    code: &str,
) -> Result<TokenResponse> {
    let response = client
        .post(&endpoints.token)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", endpoints.redirect_uri.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.expose().as_str()),
            ("access_type", "offline"),
            ("approval_prompt", "force"),
        ])
        .send()
        .await
        .map_err(|e| Error::Http(format!("token exchange request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));
        return Err(Error::TokenExchange(format!(
            "token endpoint returned {status}: {body}"
        )));
    }

    let token = response
        .json::<TokenResponse>()
        .await
        .map_err(|e| Error::TokenExchange(format!("invalid token response: {e}")))?;

    debug!(
        has_refresh_token = !token.refresh_token.is_empty(),
        has_id_token = token.id_token.is_some(),
        "authorization code exchanged"
    );
    Ok(token)
}
