//! Error types for Google OAuth operations

/// Errors from the OAuth flow and identity lookup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("missing id_token, require scope=openid")]
    MissingIdToken,

    #[error("userinfo lookup failed: {0}")]
    UserInfo(String),

    #[error("credential parse error: {0}")]
    CredentialParse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
