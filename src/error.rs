//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Missing path parameter: {0}")]
    MissingPathParameter(String),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[cfg(feature = "http")]
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request canceled")]
    Canceled,

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl SdkError {
    /// True if the call was aborted by the caller.
    ///
    /// Lets UI code ignore rejections triggered by its own cleanup.
    pub fn is_canceled(&self) -> bool {
        matches!(self, SdkError::Canceled)
    }

    /// HTTP status of an [`ApiError`], if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api(e) => Some(e.status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::Api(e) if e.is_not_found())
    }
}

/// A non-2xx response from the server.
///
/// The raw body is kept untouched for caller inspection. `status_text` is the
/// canonical reason phrase for `status` (`"Not Found"` for 404), not the
/// phrase on the server's status line, which HTTP/2 responses do not carry.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} ({status} {status_text}) at {url}")]
pub struct ApiError {
    pub url: String,
    pub status: u16,
    pub status_text: String,
    pub body: String,
    pub message: String,
}

impl ApiError {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let status_text = status_text(status).to_string();
        let body = body.into();
        let message = default_message(status).map(str::to_string).unwrap_or_else(|| {
            format!(
                "Generic Error: status: {}; status text: {}; body: {}",
                status, status_text, body
            )
        });
        Self {
            url: url.into(),
            status,
            status_text,
            body,
            message,
        }
    }

    /// Replace the message (used for endpoint-specific error descriptions).
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// Messages for the statuses every endpoint may return.
fn default_message(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Bad Request"),
        401 => Some("Unauthorized"),
        403 => Some("Forbidden"),
        404 => Some("Not Found"),
        500 => Some("Internal Server Error"),
        502 => Some("Bad Gateway"),
        503 => Some("Service Unavailable"),
        _ => None,
    }
}

#[cfg(feature = "http")]
fn status_text(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

#[cfg(not(feature = "http"))]
fn status_text(status: u16) -> &'static str {
    default_message(status).unwrap_or("")
}
