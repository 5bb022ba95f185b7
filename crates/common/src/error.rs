//! Common error types

use thiserror::Error;

/// Errors raised while resolving configuration
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias using common Error
pub type Result<T> = std::result::Result<T, Error>;
