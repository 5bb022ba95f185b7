//! Consent URL construction
//!
//! The helper asks for offline access with forced consent so Google always
//! issues a refresh token, even when the user approved the app before.

use url::Url;

use crate::constants::{Endpoints, SCOPES};
use crate::error::{Error, Result};

/// Build the authorization URL the user opens in a browser.
pub fn build_authorization_url(endpoints: &Endpoints, client_id: &str) -> Result<String> {
    let scope = SCOPES.join(" ");
    let url = Url::parse_with_params(
        &endpoints.authorize,
        &[
            ("access_type", "offline"),
            ("approval_prompt", "force"),
            ("client_id", client_id),
            ("redirect_uri", endpoints.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| Error::InvalidUrl(format!("{}: {e}", endpoints.authorize)))?;

    Ok(url.into())
}
