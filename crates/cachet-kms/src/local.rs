//! In-process software keys behind the [`KeyService`] trait.
//!
//! Stand-in for the remote service when developing offline or under test.
//! Keys live only in memory and behave like their KMS counterparts: signing
//! under an algorithm the key cannot serve is a service error, and the
//! public key is handed out as SPKI DER.

use std::collections::HashMap;

use async_trait::async_trait;
use p256::ecdsa::{signature::Signer, Signature as EcdsaSignature, SigningKey};
use pkcs8::EncodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};

use crate::{
    algorithm::SigningAlgorithm,
    client::KeyService,
    error::{Error, Result},
};

enum LocalKey {
    Rsa(RsaPrivateKey),
    P256(p256::SecretKey),
}

/// [`KeyService`] over in-memory software keys
#[derive(Default)]
pub struct LocalKeyService {
    keys: HashMap<String, LocalKey>,
}

impl LocalKeyService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate and register a 2048-bit RSA key under `key_id`.
    pub fn generate_rsa(&mut self, key_id: impl Into<String>) -> Result<()> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048)
            .map_err(|e| Error::Service(format!("RSA key generation failed: {}", e)))?;
        self.keys.insert(key_id.into(), LocalKey::Rsa(private_key));
        Ok(())
    }

    /// Generate and register a P-256 key under `key_id`.
    pub fn generate_p256(&mut self, key_id: impl Into<String>) {
        let secret_key = p256::SecretKey::random(&mut rand::thread_rng());
        self.keys.insert(key_id.into(), LocalKey::P256(secret_key));
    }

    fn key(&self, key_id: &str) -> Result<&LocalKey> {
        self.keys
            .get(key_id)
            .ok_or_else(|| Error::UnknownKey(key_id.to_string()))
    }
}

#[async_trait]
impl KeyService for LocalKeyService {
    async fn sign(
        &self,
        key_id: &str,
        message: &[u8],
        algorithm: &SigningAlgorithm,
    ) -> Result<Vec<u8>> {
        match (self.key(key_id)?, algorithm) {
            (LocalKey::Rsa(private_key), SigningAlgorithm::RsassaPkcs1V15Sha256) => {
                let hashed = Sha256::digest(message);
                private_key
                    .sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
                    .map_err(|e| Error::Service(format!("RSA signing failed: {}", e)))
            }
            (LocalKey::P256(secret_key), SigningAlgorithm::EcdsaSha256) => {
                let signing_key = SigningKey::from(secret_key);
                let signature: EcdsaSignature = signing_key.sign(message);
                Ok(signature.to_der().as_bytes().to_vec())
            }
            (_, SigningAlgorithm::Other(name)) => Err(Error::UnsupportedAlgorithm(name.clone())),
            (_, algorithm) => Err(Error::Service(format!(
                "key {} cannot sign under {}",
                key_id, algorithm
            ))),
        }
    }

    async fn public_key_der(&self, key_id: &str) -> Result<Vec<u8>> {
        let der = match self.key(key_id)? {
            LocalKey::Rsa(private_key) => private_key
                .to_public_key()
                .to_public_key_der()
                .map_err(|e| Error::Service(format!("SPKI encoding failed: {}", e)))?,
            LocalKey::P256(secret_key) => secret_key
                .public_key()
                .to_public_key_der()
                .map_err(|e| Error::Service(format!("SPKI encoding failed: {}", e)))?,
        };
        Ok(der.as_bytes().to_vec())
    }
}
