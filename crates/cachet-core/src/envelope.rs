//! Wire types produced and consumed by the engine.

use cachet_kms::SigningAlgorithm;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of a successful sign operation.
///
/// `payload` is the caller's original object, not its canonical form; the
/// signature was computed over the canonical encoding and verification
/// re-derives it. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedEnvelope {
    /// The original structured object, unchanged
    pub payload: Value,
    /// Base64 (standard alphabet) transport encoding of the signature
    pub signature: String,
    /// Identifier of the key that signed
    pub key_identifier: String,
    /// Epoch milliseconds at which the signature was produced
    pub created_at: i64,
    /// Algorithm the signature was produced under
    pub algorithm: SigningAlgorithm,
}

/// Verdict of a verify operation.
///
/// `payload` is present iff `valid`; `error_detail` iff not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl VerificationOutcome {
    pub fn valid(payload: Value) -> Self {
        Self {
            valid: true,
            payload: Some(payload),
            error_detail: None,
        }
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self {
            valid: false,
            payload: None,
            error_detail: Some(detail.into()),
        }
    }
}
