//! Base configuration shared by every request a client dispatches.

use crate::error::SdkError;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use std::fmt;
use std::time::Duration;

/// Encodes one path-parameter value into a URL path segment.
pub type PathEncoder = fn(&str) -> String;

/// Default path encoder: percent-encodes everything outside the unreserved set,
/// so `/` in a value cannot split it into two segments.
pub fn encode_path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Whether the browser sends cookies with requests (`fetch` credentials mode).
///
/// Only applied on `wasm32`; native clients do not keep a cookie store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialsPolicy {
    #[default]
    Include,
    SameOrigin,
    Omit,
}

/// Base configuration: host, default headers, auth, credentials policy.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) headers: HeaderMap,
    pub(crate) token: Option<String>,
    pub(crate) basic_auth: Option<(String, Option<String>)>,
    pub(crate) credentials: CredentialsPolicy,
    pub(crate) timeout: Option<Duration>,
    pub(crate) encode_path: PathEncoder,
}

impl ClientConfig {
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn credentials(&self) -> CredentialsPolicy {
        self.credentials
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn encode_path(&self, value: &str) -> String {
        (self.encode_path)(value)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field(
                "basic_auth",
                &self.basic_auth.as_ref().map(|(user, _)| user.as_str()),
            )
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone)]
pub struct ClientConfigBuilder {
    base_url: String,
    headers: Vec<(String, String)>,
    token: Option<String>,
    basic_auth: Option<(String, Option<String>)>,
    credentials: CredentialsPolicy,
    timeout: Option<Duration>,
    encode_path: PathEncoder,
}

impl ClientConfigBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: Vec::new(),
            token: None,
            basic_auth: None,
            credentials: CredentialsPolicy::default(),
            timeout: None,
            encode_path: encode_path_segment,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Add a default header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Bearer token. Takes precedence over basic credentials.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.basic_auth = Some((username.into(), password));
        self
    }

    pub fn credentials(mut self, policy: CredentialsPolicy) -> Self {
        self.credentials = policy;
        self
    }

    /// Per-request timeout. Unset by default: callers that need one can also
    /// cancel the call from a timer.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn encode_path(mut self, encoder: PathEncoder) -> Self {
        self.encode_path = encoder;
        self
    }

    pub fn build(self) -> Result<ClientConfig, SdkError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            SdkError::InvalidConfig(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SdkError::InvalidConfig(format!(
                "Unsupported base URL scheme '{}'",
                url.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in self.headers {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|e| {
                SdkError::InvalidConfig(format!("Invalid header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(&value).map_err(|e| {
                SdkError::InvalidConfig(format!("Invalid header value for '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(ClientConfig {
            base_url: self.base_url,
            headers,
            token: self.token,
            basic_auth: self.basic_auth,
            credentials: self.credentials,
            timeout: self.timeout,
            encode_path: self.encode_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = ClientConfig::builder("http://console.local:8080/").build().unwrap();
        assert_eq!(config.base_url(), "http://console.local:8080");
        assert_eq!(config.credentials(), CredentialsPolicy::Include);
        assert!(config.timeout().is_none());
        assert!(!config.has_token());
    }

    #[test]
    fn test_builder_default_headers() {
        let config = ClientConfig::builder("http://console.local")
            .header("X-Tenant", "jvm-build")
            .build()
            .unwrap();
        assert_eq!(config.headers().get("x-tenant").unwrap(), "jvm-build");
        assert_eq!(config.headers().get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        assert!(matches!(
            ClientConfig::builder("not a url").build(),
            Err(SdkError::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientConfig::builder("ftp://console.local").build(),
            Err(SdkError::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientConfig::builder("http://console.local")
                .header("bad header", "v")
                .build(),
            Err(SdkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ClientConfig::builder("http://console.local")
            .token("s3cret")
            .basic_auth("admin", Some("hunter2".into()))
            .build()
            .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("admin"));
    }

    #[test]
    fn test_default_path_encoder_escapes_slash() {
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
        assert_eq!(encode_path_segment("foo-1.0"), "foo-1.0");
    }
}
