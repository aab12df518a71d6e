//! Sign/verify orchestration against a key service.

use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use cachet_canon::canonical_json;
use cachet_kms::{AwsKeyService, KeyService, KmsConfig, SigningAlgorithm};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    encoding::spki_der_to_pem,
    envelope::{SignedEnvelope, VerificationOutcome},
    error::{Error, Result},
    verify::verify_signature,
};

const PUBLIC_KEY_UNAVAILABLE: &str = "Could not retrieve public key from KMS";
const SIGNATURE_INVALID: &str = "signature verification failed";

/// Stateless signing/verification engine.
///
/// Holds the key-service handle, the identifier of the signing key, and the
/// default algorithm. Every call is an independent request/response unit of
/// work; concurrent calls share nothing mutable.
pub struct Engine {
    service: Arc<dyn KeyService>,
    key_id: String,
    default_algorithm: SigningAlgorithm,
}

impl Engine {
    pub fn new(service: Arc<dyn KeyService>, key_id: impl Into<String>) -> Self {
        Self {
            service,
            key_id: key_id.into(),
            default_algorithm: SigningAlgorithm::default(),
        }
    }

    /// Build an engine backed by AWS KMS from explicit configuration.
    pub async fn connect(config: &KmsConfig) -> Self {
        let service = AwsKeyService::new(config).await;
        Self::new(Arc::new(service), config.key_id.clone())
    }

    pub fn with_default_algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
        self.default_algorithm = algorithm;
        self
    }

    /// Identifier of the configured signing key
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Sign `payload` under the default algorithm.
    pub async fn sign(&self, payload: &Value) -> Result<SignedEnvelope> {
        self.sign_with_algorithm(payload, self.default_algorithm.clone())
            .await
    }

    /// Sign `payload` with the configured key.
    ///
    /// All-or-nothing: any failure to obtain a signature is
    /// [`Error::Signing`] and no envelope is returned. The envelope carries
    /// the original payload; the signature covers its canonical encoding.
    pub async fn sign_with_algorithm(
        &self,
        payload: &Value,
        algorithm: SigningAlgorithm,
    ) -> Result<SignedEnvelope> {
        debug!(key_id = %self.key_id, algorithm = %algorithm, "signing payload");
        let message = canonical_json(payload).into_bytes();
        let signature = self
            .service
            .sign(&self.key_id, &message, &algorithm)
            .await
            .map_err(|e| Error::Signing(e.to_string()))?;
        Ok(SignedEnvelope {
            payload: payload.clone(),
            signature: general_purpose::STANDARD.encode(signature),
            key_identifier: self.key_id.clone(),
            created_at: Utc::now().timestamp_millis(),
            algorithm,
        })
    }

    /// Verify an envelope against the key it names.
    ///
    /// Never raises: rejection is data for the receiver to handle, so every
    /// failure mode (unreachable key, malformed signature, unsupported
    /// algorithm, cryptographic rejection) comes back as a non-valid
    /// [`VerificationOutcome`].
    pub async fn verify(&self, envelope: &SignedEnvelope) -> VerificationOutcome {
        let der = match self.service.public_key_der(&envelope.key_identifier).await {
            Ok(der) if !der.is_empty() => der,
            Ok(_) => {
                warn!(key_id = %envelope.key_identifier, "key service returned empty public key");
                return VerificationOutcome::invalid(PUBLIC_KEY_UNAVAILABLE);
            }
            Err(e) => {
                warn!(key_id = %envelope.key_identifier, error = %e, "public key fetch failed");
                return VerificationOutcome::invalid(PUBLIC_KEY_UNAVAILABLE);
            }
        };

        // Must reproduce the exact bytes that were signed; determinism of
        // the canonical encoding is load-bearing here.
        let message = canonical_json(&envelope.payload).into_bytes();

        let signature = match general_purpose::STANDARD.decode(&envelope.signature) {
            Ok(signature) => signature,
            Err(e) => {
                return VerificationOutcome::invalid(format!("Malformed signature encoding: {}", e))
            }
        };

        let public_key_pem = spki_der_to_pem(&der);

        match verify_signature(&envelope.algorithm, &public_key_pem, &message, &signature) {
            Ok(true) => VerificationOutcome::valid(envelope.payload.clone()),
            Ok(false) => VerificationOutcome::invalid(SIGNATURE_INVALID),
            Err(e) => {
                warn!(key_id = %envelope.key_identifier, error = %e, "verification could not run");
                VerificationOutcome::invalid(e.to_string())
            }
        }
    }
}
