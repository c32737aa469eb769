//! HTTP layer — request dispatch, cancelable calls, and `ConsoleHttp`.

pub mod client;
pub mod config;
pub mod pending;
pub mod request;
pub mod response;

pub use client::ConsoleHttp;
pub use config::{ClientConfig, ClientConfigBuilder, CredentialsPolicy, PathEncoder};
pub use pending::{CallState, CancelHandle, MaybeSend, PendingCall};
pub use request::{QueryValue, RequestDescriptor};
pub use response::RawResponse;
