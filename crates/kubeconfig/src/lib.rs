//! Kubernetes client configuration documents
//!
//! Typed enough to build and replace `users` entries, loose enough to carry
//! every other field of an existing kubeconfig through a load/merge/write
//! cycle unchanged. Loading several files follows the clientcmd precedence
//! rule: for colliding names the earlier file wins.

pub mod auth_info;
pub mod error;
mod loader;
mod merge;
pub mod types;

pub use auth_info::OidcConfig;
pub use error::{Error, Result};
pub use loader::{default_path, merge_into_file};
pub use types::{AuthInfo, AuthProviderConfig, Kubeconfig, NamedAuthInfo, NamedItem};
