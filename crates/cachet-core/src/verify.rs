//! Local signature verification.
//!
//! The match in [`verify_signature`] is the single place where algorithm
//! identifiers meet verification primitives; the sign path goes through the
//! same [`SigningAlgorithm`] values, so the two cannot drift apart.

use cachet_kms::SigningAlgorithm;
use p256::ecdsa::{signature::Verifier, Signature as EcdsaSignature, VerifyingKey};
use pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Check `signature` over `message` with a PEM public key.
///
/// `Ok(false)` is a cryptographically negative result; `Err` means the
/// check could not be run at all (unparseable key, unsupported algorithm).
pub fn verify_signature(
    algorithm: &SigningAlgorithm,
    public_key_pem: &str,
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    match algorithm {
        SigningAlgorithm::RsassaPkcs1V15Sha256 => {
            verify_rsa_pkcs1v15_sha256(public_key_pem, message, signature)
        }
        SigningAlgorithm::EcdsaSha256 => verify_ecdsa_sha256(public_key_pem, message, signature),
        SigningAlgorithm::Other(name) => Err(Error::UnsupportedAlgorithm(name.clone())),
    }
}

fn verify_rsa_pkcs1v15_sha256(pem: &str, message: &[u8], signature: &[u8]) -> Result<bool> {
    let public_key =
        RsaPublicKey::from_public_key_pem(pem).map_err(|e| Error::InvalidKey(e.to_string()))?;
    let hashed = Sha256::digest(message);
    Ok(public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature)
        .is_ok())
}

fn verify_ecdsa_sha256(pem: &str, message: &[u8], signature: &[u8]) -> Result<bool> {
    let public_key =
        p256::PublicKey::from_public_key_pem(pem).map_err(|e| Error::InvalidKey(e.to_string()))?;
    let verifying_key = VerifyingKey::from(&public_key);
    // KMS hands back DER-encoded ECDSA signatures; malformed DER is a
    // negative result, not an error.
    let signature = match EcdsaSignature::from_der(signature) {
        Ok(signature) => signature,
        Err(_) => return Ok(false),
    };
    Ok(verifying_key.verify(message, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use p256::ecdsa::signature::Signer;
    use pkcs8::EncodePublicKey;
    use rsa::{pkcs8::LineEnding, RsaPrivateKey};

    use super::*;

    fn rsa_fixture(message: &[u8]) -> (String, Vec<u8>) {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).unwrap();
        let pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap();
        let hashed = Sha256::digest(message);
        let signature = private_key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
            .unwrap();
        (pem, signature)
    }

    fn p256_fixture(message: &[u8]) -> (String, Vec<u8>) {
        let secret_key = p256::SecretKey::random(&mut rand::thread_rng());
        let pem = secret_key
            .public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap();
        let signing_key = p256::ecdsa::SigningKey::from(&secret_key);
        let signature: EcdsaSignature = signing_key.sign(message);
        (pem, signature.to_der().as_bytes().to_vec())
    }

    #[test]
    fn test_rsa_verify() {
        let message = b"context bytes";
        let (pem, signature) = rsa_fixture(message);

        assert!(verify_signature(
            &SigningAlgorithm::RsassaPkcs1V15Sha256,
            &pem,
            message,
            &signature
        )
        .unwrap());
        assert!(!verify_signature(
            &SigningAlgorithm::RsassaPkcs1V15Sha256,
            &pem,
            b"different bytes",
            &signature
        )
        .unwrap());
    }

    #[test]
    fn test_ecdsa_verify() {
        let message = b"context bytes";
        let (pem, signature) = p256_fixture(message);

        assert!(
            verify_signature(&SigningAlgorithm::EcdsaSha256, &pem, message, &signature).unwrap()
        );
        assert!(!verify_signature(
            &SigningAlgorithm::EcdsaSha256,
            &pem,
            b"different bytes",
            &signature
        )
        .unwrap());
    }

    #[test]
    fn test_malformed_ecdsa_der_is_negative() {
        let (pem, _) = p256_fixture(b"msg");
        let verdict =
            verify_signature(&SigningAlgorithm::EcdsaSha256, &pem, b"msg", &[0x01, 0x02]).unwrap();
        assert!(!verdict);
    }

    #[test]
    fn test_unsupported_algorithm() {
        let (pem, signature) = p256_fixture(b"msg");
        let err = verify_signature(
            &SigningAlgorithm::Other("ECDSA_SHA_512".into()),
            &pem,
            b"msg",
            &signature,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(_)));
        assert!(err.to_string().contains("ECDSA_SHA_512"));
    }

    #[test]
    fn test_unparseable_key() {
        let err = verify_signature(
            &SigningAlgorithm::RsassaPkcs1V15Sha256,
            "-----BEGIN PUBLIC KEY-----\nnot a key\n-----END PUBLIC KEY-----\n",
            b"msg",
            &[0u8; 256],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));
    }
}
