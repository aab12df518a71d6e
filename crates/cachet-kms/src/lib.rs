//! Key-service access for cachet.
//!
//! The signing private key lives in a remote key-management service and is
//! never exported; this crate exposes the two capabilities the engine needs
//! (raw-message signing and public-key retrieval) behind the [`KeyService`]
//! trait, with an AWS KMS implementation and an in-process software-key
//! implementation for offline use and tests.

pub mod algorithm;
pub mod client;
pub mod config;
pub mod error;
pub mod local;

// Re-export commonly used types for convenience
pub use algorithm::SigningAlgorithm;
pub use client::{AwsKeyService, KeyService};
pub use config::{KmsConfig, StaticCredentials, DEFAULT_REGION};
pub use error::{Error, Result};
pub use local::LocalKeyService;
