//! Low-level HTTP client — `ConsoleHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the high-level client). Every call goes through [`ConsoleHttp::dispatch`].

use crate::domain::build::wire::{BuildDto, BuildPage};
use crate::domain::build::DiscoveryLog;
use crate::error::{ApiError, SdkError};
use crate::http::config::ClientConfig;
use crate::http::pending::{MaybeSend, PendingCall};
use crate::http::request::RequestDescriptor;
use crate::http::response::RawResponse;
use crate::network::{BUILD_HISTORY_PATH, BUILD_PATH, DISCOVERY_LOGS_PATH};

use async_lock::RwLock;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

/// Low-level HTTP client for the console build-history API.
#[derive(Clone)]
pub struct ConsoleHttp {
    config: Arc<ClientConfig>,
    client: Client,
    /// Bearer token. Starts from the config; may be rotated at runtime.
    token: Arc<RwLock<Option<String>>>,
}

impl ConsoleHttp {
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.pool_max_idle_per_host(10);
            if let Some(timeout) = config.timeout {
                builder = builder.timeout(timeout);
            }
        }

        Ok(Self {
            token: Arc::new(RwLock::new(config.token.clone())),
            client: builder.build()?,
            config: Arc::new(config),
        })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub(crate) async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    // ── Build history ────────────────────────────────────────────────────

    pub fn get_api_builds_history(
        &self,
        gav: Option<&str>,
        page: Option<u32>,
        per_page: Option<u32>,
        state: Option<&str>,
    ) -> PendingCall<BuildPage> {
        let descriptor = RequestDescriptor::get(BUILD_HISTORY_PATH)
            .query("gav", gav)
            .query("page", page)
            .query("perPage", per_page)
            .query("state", state);
        self.dispatch(descriptor)
    }

    pub fn get_api_builds_history_discovery_logs(&self, name: &str) -> PendingCall<DiscoveryLog> {
        let descriptor = RequestDescriptor::get(DISCOVERY_LOGS_PATH).path("name", name);
        self.dispatch_raw(descriptor)
            .and_then(RawResponse::into_discovery_log)
    }

    pub fn get_build(&self, name: &str) -> PendingCall<BuildDto> {
        let descriptor = RequestDescriptor::get(BUILD_PATH).path("name", name);
        self.dispatch(descriptor)
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    /// Issue `descriptor` and decode a 2xx body as JSON.
    pub fn dispatch<T>(&self, descriptor: RequestDescriptor) -> PendingCall<T>
    where
        T: DeserializeOwned + MaybeSend + 'static,
    {
        let exchange = self.exchange(descriptor);
        PendingCall::new(async move { exchange.await?.json() })
    }

    /// Issue `descriptor` and hand back the undecoded 2xx body.
    pub fn dispatch_raw(&self, descriptor: RequestDescriptor) -> PendingCall<RawResponse> {
        PendingCall::new(self.exchange(descriptor))
    }

    fn exchange(
        &self,
        descriptor: RequestDescriptor,
    ) -> impl Future<Output = Result<RawResponse, SdkError>> + MaybeSend + 'static {
        let client = self.client.clone();
        let config = self.config.clone();
        let token = self.token.clone();

        async move {
            let url = descriptor.url(&config)?;
            let RequestDescriptor {
                method,
                headers,
                body,
                errors,
                ..
            } = descriptor;

            let mut req = client.request(method.clone(), &url).headers(config.headers.clone());
            for (name, value) in &headers {
                req = req.header(name.as_str(), value.as_str());
            }

            let bearer = token.read().await.clone();
            if let Some(token) = bearer {
                req = req.bearer_auth(token);
            } else if let Some((username, password)) = &config.basic_auth {
                req = req.basic_auth(username, password.as_ref());
            }

            #[cfg(target_arch = "wasm32")]
            {
                use crate::http::config::CredentialsPolicy;
                req = match config.credentials {
                    CredentialsPolicy::Include => req.fetch_credentials_include(),
                    CredentialsPolicy::SameOrigin => req.fetch_credentials_same_origin(),
                    CredentialsPolicy::Omit => req.fetch_credentials_omit(),
                };
            }

            if let Some(b) = &body {
                req = req.json(b);
            }

            tracing::debug!(method = %method, url = %url, "Dispatching request");
            let resp = req.send().await?;
            let status = resp.status();
            let content_type = resp
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let bytes = resp.bytes().await?;
            tracing::debug!(status = status.as_u16(), url = %url, "Response received");

            if status.is_success() {
                return Ok(RawResponse {
                    status: status.as_u16(),
                    content_type,
                    body: bytes.to_vec(),
                });
            }

            let status_code = status.as_u16();
            let mut error = ApiError::new(url, status_code, String::from_utf8_lossy(&bytes));
            if let Some(message) = errors.get(&status_code) {
                error = error.with_message(message.clone());
            }
            Err(error.into())
        }
    }
}
