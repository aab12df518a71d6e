use thiserror::Error;

/// Key-service error type
#[derive(Error, Debug)]
pub enum Error {
    /// Transport or service-side failure reported by the key service
    #[error("Key service error: {0}")]
    Service(String),

    /// The service answered a sign request without signature material
    #[error("Key service returned no signature material")]
    NoSignature,

    /// The service answered a key request without key material
    #[error("Key service returned no public key material")]
    MissingPublicKey,

    /// No key is registered under the requested identifier
    #[error("Unknown key identifier: {0}")]
    UnknownKey(String),

    /// The requested algorithm is outside the supported set
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
