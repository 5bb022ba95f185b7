//! Types shared across the k8s-oidc-helper crates

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
