//! The key-service seam and its AWS KMS implementation.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_kms::{
    config::Credentials,
    error::DisplayErrorContext,
    primitives::Blob,
    types::{MessageType, SigningAlgorithmSpec},
    Client,
};
use tracing::debug;

use crate::{
    algorithm::SigningAlgorithm,
    config::KmsConfig,
    error::{Error, Result},
};

/// Remote signing capability.
///
/// The private key never crosses this boundary: implementations sign raw
/// message bytes and hand back signature or public-key material only.
#[async_trait]
pub trait KeyService: Send + Sync {
    /// Sign raw message bytes with the key named by `key_id`.
    async fn sign(
        &self,
        key_id: &str,
        message: &[u8],
        algorithm: &SigningAlgorithm,
    ) -> Result<Vec<u8>>;

    /// Fetch the SPKI DER public key for `key_id`.
    async fn public_key_der(&self, key_id: &str) -> Result<Vec<u8>>;
}

/// [`KeyService`] backed by AWS KMS
pub struct AwsKeyService {
    client: Client,
}

impl AwsKeyService {
    /// Build a client from explicit configuration.
    ///
    /// Without static credentials the SDK's default provider chain applies
    /// (environment, profile, instance metadata).
    pub async fn new(config: &KmsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region().to_owned()));
        if let Some(credentials) = &config.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                credentials.session_token.clone(),
                None,
                "cachet-static",
            ));
        }
        let sdk_config = loader.load().await;
        Self {
            client: Client::new(&sdk_config),
        }
    }

    /// Wrap an already-configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn signing_algorithm_spec(algorithm: &SigningAlgorithm) -> Result<SigningAlgorithmSpec> {
    match algorithm {
        SigningAlgorithm::RsassaPkcs1V15Sha256 => Ok(SigningAlgorithmSpec::RsassaPkcs1V15Sha256),
        SigningAlgorithm::EcdsaSha256 => Ok(SigningAlgorithmSpec::EcdsaSha256),
        SigningAlgorithm::Other(name) => Err(Error::UnsupportedAlgorithm(name.clone())),
    }
}

#[async_trait]
impl KeyService for AwsKeyService {
    async fn sign(
        &self,
        key_id: &str,
        message: &[u8],
        algorithm: &SigningAlgorithm,
    ) -> Result<Vec<u8>> {
        let spec = signing_algorithm_spec(algorithm)?;
        debug!(key_id, algorithm = %algorithm, "requesting KMS signature");
        let output = self
            .client
            .sign()
            .key_id(key_id)
            .message(Blob::new(message))
            .message_type(MessageType::Raw)
            .signing_algorithm(spec)
            .send()
            .await
            .map_err(|e| Error::Service(format!("{}", DisplayErrorContext(&e))))?;
        let signature = output.signature().ok_or(Error::NoSignature)?;
        Ok(signature.as_ref().to_vec())
    }

    async fn public_key_der(&self, key_id: &str) -> Result<Vec<u8>> {
        debug!(key_id, "fetching KMS public key");
        let output = self
            .client
            .get_public_key()
            .key_id(key_id)
            .send()
            .await
            .map_err(|e| Error::Service(format!("{}", DisplayErrorContext(&e))))?;
        let public_key = output.public_key().ok_or(Error::MissingPublicKey)?;
        Ok(public_key.as_ref().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_spec_mapping() {
        assert_eq!(
            signing_algorithm_spec(&SigningAlgorithm::RsassaPkcs1V15Sha256).unwrap(),
            SigningAlgorithmSpec::RsassaPkcs1V15Sha256
        );
        assert_eq!(
            signing_algorithm_spec(&SigningAlgorithm::EcdsaSha256).unwrap(),
            SigningAlgorithmSpec::EcdsaSha256
        );
    }

    #[test]
    fn test_unsupported_algorithm_named_in_error() {
        let err =
            signing_algorithm_spec(&SigningAlgorithm::Other("ECDSA_SHA_384".into())).unwrap_err();
        assert!(err.to_string().contains("ECDSA_SHA_384"));
    }
}
