//! Builds sub-client — history listing, single build lookup, discovery logs.

use crate::client::ConsoleClient;
use crate::domain::build::{BuildRecord, DiscoveryLog, HistoryQuery, PagedResult};
use crate::http::PendingCall;

/// Sub-client for build history operations.
pub struct Builds<'a> {
    pub(crate) client: &'a ConsoleClient,
}

impl<'a> Builds<'a> {
    /// List build history. Unset query fields are left out of the request.
    pub fn history(&self, query: &HistoryQuery) -> PendingCall<PagedResult<BuildRecord>> {
        self.client
            .http
            .get_api_builds_history(
                query.gav.as_deref(),
                query.page,
                query.per_page,
                query.state.as_deref(),
            )
            .map(PagedResult::from)
    }

    /// Get one build by name. A missing build is an `ApiError` with status 404.
    pub fn get(&self, name: &str) -> PendingCall<BuildRecord> {
        self.client.http.get_build(name).map(BuildRecord::from)
    }

    pub fn discovery_logs(&self, name: &str) -> PendingCall<DiscoveryLog> {
        self.client.http.get_api_builds_history_discovery_logs(name)
    }
}
