use thiserror::Error;

/// Engine error type
#[derive(Error, Debug)]
pub enum Error {
    /// Signing is all-or-nothing: any failure to produce a signature is
    /// wrapped here with the underlying cause's message
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The algorithm identifier is outside the supported set
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The public key material could not be parsed
    #[error("Invalid public key: {0}")]
    InvalidKey(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
