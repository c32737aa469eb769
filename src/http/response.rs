//! Successful response bodies, before decoding.

use crate::domain::build::DiscoveryLog;
use crate::error::SdkError;

use serde::de::DeserializeOwned;

/// A 2xx response with its body fully read.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| {
                let mime = ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
                mime == "application/json" || mime.ends_with("+json")
            })
            .unwrap_or(false)
    }

    /// Decode the body as JSON regardless of content type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SdkError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Pass the body through untyped: a JSON value if the server says JSON,
    /// text otherwise, raw bytes when the text is not UTF-8.
    pub fn into_discovery_log(self) -> Result<DiscoveryLog, SdkError> {
        if !self.is_json() {
            return Ok(match String::from_utf8(self.body) {
                Ok(text) => DiscoveryLog::Text(text),
                Err(e) => DiscoveryLog::Bytes(e.into_bytes()),
            });
        }
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(DiscoveryLog::Json(serde_json::Value::Null));
        }
        Ok(DiscoveryLog::Json(self.json()?))
    }
}
