//! Errors of the interactive flow itself

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no authorization code entered")]
    EmptyCode,

    #[error("standard input closed before an authorization code was entered")]
    InputClosed,

    #[error("reading authorization code: {0}")]
    Input(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages_are_descriptive() {
        assert_eq!(
            Error::EmptyCode.to_string(),
            "no authorization code entered"
        );
        let closed = Error::InputClosed.to_string();
        assert!(closed.contains("standard input closed"));

        let io = Error::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe gone",
        ));
        assert!(io.to_string().contains("pipe gone"), "got: {io}");
    }
}
