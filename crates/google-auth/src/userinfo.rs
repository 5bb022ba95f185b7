//! Userinfo lookup

use serde::Deserialize;
use tracing::debug;

use crate::constants::Endpoints;
use crate::error::{Error, Result};

/// The subset of the userinfo document the helper reads.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub verified_email: Option<bool>,
}

/// Fetch the email address of the account that granted `access_token`.
pub async fn fetch_email(
    client: &reqwest::Client,
    endpoints: &Endpoints,
    access_token: &str,
) -> Result<String> {
    let response = client
        .get(&endpoints.userinfo)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| Error::Http(format!("userinfo request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));
        return Err(Error::UserInfo(format!(
            "userinfo endpoint returned {status}: {body}"
        )));
    }

    let info = response
        .json::<UserInfo>()
        .await
        .map_err(|e| Error::UserInfo(format!("invalid userinfo response: {e}")))?;

    match info.email {
        Some(email) if !email.is_empty() => {
            debug!(%email, verified = ?info.verified_email, "resolved user email");
            Ok(email)
        }
        _ => Err(Error::UserInfo(
            "userinfo response has no email, require scope=email".into(),
        )),
    }
}
