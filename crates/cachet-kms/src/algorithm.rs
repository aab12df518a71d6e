//! Signing-algorithm identifiers.
//!
//! The variants mirror the key service's own enumeration, and the wire
//! strings are the service's names. Exactly two algorithms are supported;
//! everything else deserializes into [`SigningAlgorithm::Other`] so a
//! foreign envelope can still be inspected and rejected by name instead of
//! failing to parse.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported signing algorithms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// RSA PKCS#1 v1.5 with SHA-256
    #[serde(rename = "RSASSA_PKCS1_V1_5_SHA_256")]
    RsassaPkcs1V15Sha256,
    /// ECDSA (NIST P-256) with SHA-256
    #[serde(rename = "ECDSA_SHA_256")]
    EcdsaSha256,
    /// Any identifier outside the supported set, kept verbatim
    #[serde(untagged)]
    Other(String),
}

impl SigningAlgorithm {
    /// The wire identifier for this algorithm
    pub fn as_str(&self) -> &str {
        match self {
            SigningAlgorithm::RsassaPkcs1V15Sha256 => "RSASSA_PKCS1_V1_5_SHA_256",
            SigningAlgorithm::EcdsaSha256 => "ECDSA_SHA_256",
            SigningAlgorithm::Other(name) => name,
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SigningAlgorithm {
    fn default() -> Self {
        SigningAlgorithm::RsassaPkcs1V15Sha256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&SigningAlgorithm::RsassaPkcs1V15Sha256).unwrap(),
            r#""RSASSA_PKCS1_V1_5_SHA_256""#
        );
        assert_eq!(
            serde_json::to_string(&SigningAlgorithm::EcdsaSha256).unwrap(),
            r#""ECDSA_SHA_256""#
        );
    }

    #[test]
    fn test_roundtrip() {
        for algorithm in [
            SigningAlgorithm::RsassaPkcs1V15Sha256,
            SigningAlgorithm::EcdsaSha256,
        ] {
            let text = serde_json::to_string(&algorithm).unwrap();
            let back: SigningAlgorithm = serde_json::from_str(&text).unwrap();
            assert_eq!(algorithm, back);
        }
    }

    #[test]
    fn test_unknown_identifier_is_other() {
        let parsed: SigningAlgorithm = serde_json::from_str(r#""RSASSA_PSS_SHA_512""#).unwrap();
        assert_eq!(parsed, SigningAlgorithm::Other("RSASSA_PSS_SHA_512".into()));
        assert_eq!(parsed.as_str(), "RSASSA_PSS_SHA_512");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SigningAlgorithm::EcdsaSha256.to_string(),
            "ECDSA_SHA_256"
        );
    }
}
