//! Engine-facing key-service configuration.
//!
//! Configuration is an explicit caller-owned value, not process-wide state:
//! any number of independently configured engines may coexist in a process.

use serde::Deserialize;

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings for the remote key service
#[derive(Debug, Clone, Deserialize)]
pub struct KmsConfig {
    /// Identifier of the signing key (key id, ARN, or alias)
    pub key_id: String,
    /// Service region; [`DEFAULT_REGION`] when absent
    #[serde(default)]
    pub region: Option<String>,
    /// Static credentials; when absent the client resolves credentials
    /// through its default provider chain
    #[serde(default)]
    pub credentials: Option<StaticCredentials>,
}

/// Static credential triple
#[derive(Debug, Clone, Deserialize)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub session_token: Option<String>,
}

impl KmsConfig {
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            region: None,
            credentials: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(mut self, credentials: StaticCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Effective region
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }
}
