//! OIDC auth-provider entries

use std::collections::BTreeMap;

use serde_yaml::Mapping;

use crate::types::{AuthInfo, AuthProviderConfig};

/// Settings of the `oidc` auth-provider plugin understood by kubectl.
#[derive(Debug, Clone)]
pub struct OidcConfig {
    pub client_id: String,
    pub client_secret: String,
    pub id_token: String,
    pub refresh_token: String,
    pub idp_issuer_url: String,
}

impl From<OidcConfig> for AuthProviderConfig {
    fn from(oidc: OidcConfig) -> Self {
        let config = BTreeMap::from([
            ("client-id".to_string(), oidc.client_id),
            ("client-secret".to_string(), oidc.client_secret),
            ("id-token".to_string(), oidc.id_token),
            ("idp-issuer-url".to_string(), oidc.idp_issuer_url),
            ("refresh-token".to_string(), oidc.refresh_token),
        ]);
        Self {
            name: "oidc".to_string(),
            config,
        }
    }
}

impl AuthInfo {
    pub fn oidc(oidc: OidcConfig) -> Self {
        Self {
            auth_provider: Some(oidc.into()),
            other: Mapping::new(),
        }
    }
}
