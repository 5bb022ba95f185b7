//! OAuth client credentials
//!
//! The client ID and secret identify the OAuth application registered in the
//! Google Cloud console. They come either from flags/env or from a JSON file.
//! Two file shapes are accepted: a flat `{"client_id", "client_secret"}`
//! object, and the client secret file the console lets you download, which
//! nests the same keys under `installed` (desktop apps) or `web`.

use std::path::Path;

use common::Secret;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// The OAuth application's client ID and secret. Immutable once resolved.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: Secret<String>,
}

#[derive(Deserialize)]
struct CredentialKeys {
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
}

#[derive(Deserialize)]
struct CredentialFile {
    #[serde(flatten)]
    flat: CredentialKeys,
    #[serde(default)]
    installed: Option<CredentialKeys>,
    #[serde(default)]
    web: Option<CredentialKeys>,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        let client_secret: String = client_secret.into();
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load credentials from a JSON file.
    ///
    /// Top-level keys are checked first, then `installed`, then `web`. The
    /// first section carrying a `client_id` wins. A missing secret is read
    /// as empty.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::Io(format!("reading {}: {e}", path.display())))?;
        let credentials = Self::parse(&contents)?;
        info!(path = %path.display(), client_id = %credentials.client_id, "loaded OAuth client credentials");
        Ok(credentials)
    }

    /// Parse the JSON body of a credential file.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: CredentialFile = serde_json::from_str(contents)
            .map_err(|e| Error::CredentialParse(format!("parsing credential file: {e}")))?;

        let keys = [Some(file.flat), file.installed, file.web]
            .into_iter()
            .flatten()
            .find(|keys| keys.client_id.as_deref().is_some_and(|id| !id.is_empty()))
            .ok_or_else(|| Error::CredentialParse("credential file has no client_id".into()))?;

        debug!(
            has_secret = keys.client_secret.is_some(),
            "parsed credential file"
        );

        Ok(Self::new(
            keys.client_id.unwrap_or_default(),
            keys.client_secret.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_file() {
        let creds = ClientCredentials::parse(
            r#"{"client_id":"123.apps.googleusercontent.com","client_secret":"s3cret"}"#,
        )
        .unwrap();
        assert_eq!(creds.client_id, "123.apps.googleusercontent.com");
        assert_eq!(creds.client_secret.expose(), "s3cret");
    }

    #[test]
    fn parses_console_download_installed() {
        let json = r#"{
            "installed": {
                "client_id": "456.apps.googleusercontent.com",
                "project_id": "k8s-auth",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "client_secret": "installed-secret",
                "redirect_uris": ["http://localhost"]
            }
        }"#;
        let creds = ClientCredentials::parse(json).unwrap();
        assert_eq!(creds.client_id, "456.apps.googleusercontent.com");
        assert_eq!(creds.client_secret.expose(), "installed-secret");
    }

    #[test]
    fn parses_console_download_web() {
        let json = r#"{"web":{"client_id":"789","client_secret":"web-secret"}}"#;
        let creds = ClientCredentials::parse(json).unwrap();
        assert_eq!(creds.client_id, "789");
        assert_eq!(creds.client_secret.expose(), "web-secret");
    }

    #[test]
    fn flat_keys_win_over_nested_sections() {
        let json = r#"{
            "client_id": "flat",
            "client_secret": "flat-secret",
            "installed": {"client_id": "nested", "client_secret": "nested-secret"}
        }"#;
        let creds = ClientCredentials::parse(json).unwrap();
        assert_eq!(creds.client_id, "flat");
    }

    #[test]
    fn missing_secret_reads_as_empty() {
        let creds = ClientCredentials::parse(r#"{"client_id":"public-client"}"#).unwrap();
        assert!(creds.client_secret.is_empty());
    }

    #[test]
    fn rejects_file_without_client_id() {
        let err = ClientCredentials::parse(r#"{"client_secret":"orphan"}"#).unwrap_err();
        assert!(matches!(err, Error::CredentialParse(_)), "got: {err:?}");
    }

    #[test]
    fn rejects_invalid_json() {
        let err = ClientCredentials::parse("not json {{").unwrap_err();
        assert!(matches!(err, Error::CredentialParse(_)), "got: {err:?}");
    }

    #[test]
    fn debug_output_redacts_secret() {
        let creds = ClientCredentials::new("id", "do-not-print");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("do-not-print"), "secret leaked: {debug}");
    }

    #[tokio::test]
    async fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_secret.json");
        tokio::fs::write(
            &path,
            r#"{"client_id":"file-id","client_secret":"file-secret"}"#,
        )
        .await
        .unwrap();

        let creds = ClientCredentials::load(&path).await.unwrap();
        assert_eq!(creds.client_id, "file-id");
        assert_eq!(creds.client_secret.expose(), "file-secret");
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientCredentials::load(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)), "got: {err:?}");
    }
}
