//! Kubeconfig document model
//!
//! Field order matches what `kubectl config view` writes. Anything the helper
//! does not model lands in a flattened mapping so it survives a rewrite.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Mapping;

use crate::error::{Error, Result};

/// Treat an explicit YAML `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_kind() -> String {
    "Config".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kubeconfig {
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<NamedItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<NamedItem>,
    #[serde(
        rename = "current-context",
        default,
        deserialize_with = "null_as_default"
    )]
    pub current_context: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferences: Mapping,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<NamedAuthInfo>,
    /// Top-level keys not modelled above, e.g. `extensions`.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Default for Kubeconfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            clusters: Vec::new(),
            contexts: Vec::new(),
            current_context: String::new(),
            kind: default_kind(),
            preferences: Mapping::new(),
            users: Vec::new(),
            extra: Mapping::new(),
        }
    }
}

/// A `clusters` or `contexts` entry, kept opaque apart from its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedItem {
    pub name: String,
    #[serde(flatten)]
    pub rest: Mapping,
}

/// A `users` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAuthInfo {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: AuthInfo,
}

/// Credentials for one user identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthInfo {
    #[serde(
        rename = "auth-provider",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_provider: Option<AuthProviderConfig>,
    /// Other credential kinds (token, client certs, exec) pass through as-is.
    #[serde(flatten)]
    pub other: Mapping,
}

/// A named auth-provider plugin and its string settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthProviderConfig {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: BTreeMap<String, String>,
}

impl Kubeconfig {
    /// A config holding nothing but one user entry.
    pub fn with_user(name: impl Into<String>, user: AuthInfo) -> Self {
        Self {
            users: vec![NamedAuthInfo {
                name: name.into(),
                user,
            }],
            ..Self::default()
        }
    }

    /// Parse a kubeconfig document. An empty document is an empty config.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|e| Error::Yaml(format!("parsing kubeconfig: {e}")))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Yaml(format!("encoding kubeconfig: {e}")))
    }

    pub fn user(&self, name: &str) -> Option<&AuthInfo> {
        self.users.iter().find(|u| u.name == name).map(|u| &u.user)
    }
}
