//! Network constants for the management console API.

/// Default console base URL (local dev deployment).
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Build history listing.
pub const BUILD_HISTORY_PATH: &str = "/api/builds/history";

/// Discovery log for one build.
pub const DISCOVERY_LOGS_PATH: &str = "/api/builds/history/discovery-logs/{name}";

/// Single build lookup.
pub const BUILD_PATH: &str = "/api/builds/history/{name}";
