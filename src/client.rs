//! High-level client — `ConsoleClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and accessor methods.

use crate::domain::build::client::Builds;
use crate::error::SdkError;
use crate::http::{ClientConfig, ClientConfigBuilder, ConsoleHttp, CredentialsPolicy, PathEncoder};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::build::client::Builds as BuildsClient;

/// The primary entry point for the SDK.
///
/// Cheap to clone; clones share the connection pool and the auth token.
#[derive(Clone)]
pub struct ConsoleClient {
    pub(crate) http: ConsoleHttp,
}

impl ConsoleClient {
    pub fn builder() -> ConsoleClientBuilder {
        ConsoleClientBuilder::default()
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, SdkError> {
        Ok(Self {
            http: ConsoleHttp::new(config)?,
        })
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn builds(&self) -> Builds<'_> {
        Builds { client: self }
    }

    /// The low-level client, for endpoints without a sub-client method.
    pub fn http(&self) -> &ConsoleHttp {
        &self.http
    }

    // ── Auth ─────────────────────────────────────────────────────────────

    /// Replace the bearer token used by subsequent calls.
    pub async fn set_token(&self, token: impl Into<String>) {
        self.http.set_token(Some(token.into())).await;
    }

    pub async fn clear_token(&self) {
        self.http.set_token(None).await;
    }

    pub async fn has_token(&self) -> bool {
        self.http.has_token().await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ConsoleClientBuilder {
    config: ClientConfigBuilder,
}

impl Default for ConsoleClientBuilder {
    fn default() -> Self {
        Self {
            config: ClientConfigBuilder::new(crate::network::DEFAULT_API_URL),
        }
    }
}

impl ConsoleClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.config = self.config.base_url(url);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.header(name, value);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config = self.config.token(token);
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.config = self.config.basic_auth(username, password);
        self
    }

    pub fn credentials(mut self, policy: CredentialsPolicy) -> Self {
        self.config = self.config.credentials(policy);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    pub fn encode_path(mut self, encoder: PathEncoder) -> Self {
        self.config = self.config.encode_path(encoder);
        self
    }

    pub fn build(self) -> Result<ConsoleClient, SdkError> {
        ConsoleClient::from_config(self.config.build()?)
    }
}
