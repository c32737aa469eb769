//! # JBS Console SDK
//!
//! A Rust client for the build-history API of the JVM build service management
//! console, supporting both native and WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, wire types, errors (always available, WASM-safe)
//! 2. **HTTP API** — `ConsoleHttp`: request descriptors, dispatch, cancelable `PendingCall`s
//! 3. **High-Level Client** — `ConsoleClient` with nested sub-clients returning domain types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jbs_console_sdk::prelude::*;
//!
//! let client = ConsoleClient::builder()
//!     .base_url("https://console.example.com")
//!     .token("...")
//!     .build()?;
//!
//! let page = client
//!     .builds()
//!     .history(&HistoryQuery::new().with_gav("org:lib:1.0").with_per_page(20))
//!     .await?;
//!
//! let call = client.builds().get("foo-1.0");
//! let cancel = call.cancel_handle();
//! // ... later, e.g. when the view is torn down:
//! cancel.cancel();
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL and endpoint path constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with cancelable calls.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `ConsoleClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::Gav;

    // Domain types — build
    pub use crate::domain::build::{
        BuildRecord, BuildState, DiscoveryLog, HistoryQuery, PagedResult, ScmCoordinates,
    };

    // Errors
    pub use crate::error::{ApiError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{BuildsClient, ConsoleClient, ConsoleClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::{
        CallState, CancelHandle, ClientConfig, CredentialsPolicy, PendingCall, RequestDescriptor,
    };
}
