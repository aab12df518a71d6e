//! Public-key format conversion.
//!
//! The key service hands out SPKI DER; the local verification primitives
//! take the PEM textual envelope. Conversion is a formatting step, not a
//! cryptographic one.

use pem::{EncodeConfig, LineEnding, Pem};

use crate::error::{Error, Result};

const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Wrap SPKI DER bytes in a `PUBLIC KEY` PEM envelope.
///
/// Base64 body folded at 64 columns, LF line endings. Deterministic.
pub fn spki_der_to_pem(der: &[u8]) -> String {
    let pem = Pem::new(PUBLIC_KEY_LABEL, der);
    pem::encode_config(&pem, EncodeConfig::new().set_line_ending(LineEnding::LF))
}

/// Recover SPKI DER bytes from a `PUBLIC KEY` PEM envelope.
pub fn spki_pem_to_der(pem_str: &str) -> Result<Vec<u8>> {
    let pem = pem::parse(pem_str).map_err(|e| Error::InvalidKey(e.to_string()))?;
    if pem.tag() != PUBLIC_KEY_LABEL {
        return Err(Error::InvalidKey(format!(
            "unexpected PEM label: {}",
            pem.tag()
        )));
    }
    Ok(pem.contents().to_vec())
}
