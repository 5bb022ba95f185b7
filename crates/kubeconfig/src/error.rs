//! Error types for kubeconfig handling

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("could not determine the home directory")]
    HomeDir,
}

pub type Result<T> = std::result::Result<T, Error>;
