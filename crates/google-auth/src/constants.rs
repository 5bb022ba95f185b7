//! Google OAuth endpoints and fixed flow parameters

/// Consent screen endpoint
pub const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";

/// Token endpoint for the authorization code exchange
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// OAuth2 v1 userinfo endpoint, answers with the account's email
pub const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v1/userinfo?alt=json";

/// Issuer recorded in the kubeconfig `idp-issuer-url`
pub const ISSUER_URL: &str = "https://accounts.google.com";

/// Redirect target registered for the OAuth client. The helper's landing page
/// listens here and shows the returned code.
pub const REDIRECT_URI: &str = "http://localhost:8080";

/// `openid` is what makes Google return an ID token.
pub const SCOPES: &[&str] = &["openid", "email", "profile"];

/// Set of endpoints the flow talks to.
///
/// Always `Endpoints::google()` in the binary; tests point it at a local server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub authorize: String,
    pub token: String,
    pub userinfo: String,
    pub redirect_uri: String,
}

impl Endpoints {
    pub fn google() -> Self {
        Self {
            authorize: AUTHORIZE_ENDPOINT.to_string(),
            token: TOKEN_ENDPOINT.to_string(),
            userinfo: USERINFO_ENDPOINT.to_string(),
            redirect_uri: REDIRECT_URI.to_string(),
        }
    }
}
