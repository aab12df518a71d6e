//! # Cachet
//!
//! Signing and verification of structured context messages with asymmetric
//! keys held in a remote key-management service.
//!
//! ## Crates
//!
//! - `cachet_canon` - canonical JSON encoding
//! - `cachet_kms` - key-service clients (AWS KMS, in-process software keys)
//! - `cachet_core` - signing/verification engine

// Re-export all sub-crates
pub use cachet_canon;
pub use cachet_core;
pub use cachet_kms;
