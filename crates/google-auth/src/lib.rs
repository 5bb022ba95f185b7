//! Google OAuth library for the OIDC kubeconfig helper
//!
//! Covers the client side of Google's installed-app OAuth flow: loading the
//! OAuth client credentials, building the consent URL, exchanging the
//! authorization code for tokens, and looking up the signed-in user's email.
//!
//! Flow:
//! 1. Credentials come from `ClientCredentials::load()` or `ClientCredentials::new()`
//! 2. User authorizes via `authorize::build_authorization_url()`
//! 3. The pasted code goes through `token::exchange_code()`
//! 4. `TokenResponse::into_oidc()` insists on an ID token
//! 5. `userinfo::fetch_email()` names the kubeconfig user entry

pub mod authorize;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod token;
pub mod userinfo;

pub use authorize::build_authorization_url;
pub use constants::*;
pub use credentials::ClientCredentials;
pub use error::{Error, Result};
pub use token::{OidcTokens, TokenResponse, exchange_code};
pub use userinfo::{UserInfo, fetch_email};
