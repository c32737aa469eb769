//! Build domain — build history records, lifecycle state, paging, discovery logs.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::Gav;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── BuildState ──────────────────────────────────────────────────────────────

/// Build lifecycle state.
///
/// The server reports states in several spellings (`"complete"`,
/// `"DependencyBuildStateComplete"`, `"ArtifactBuildFailed"`); all of them
/// parse to the same variant. Values this SDK does not know are preserved in
/// [`BuildState::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildState {
    New,
    Discovering,
    Pending,
    Building,
    Succeeded,
    Failed,
    Contaminated,
    Missing,
    Other(String),
}

impl BuildState {
    pub fn as_str(&self) -> &str {
        match self {
            BuildState::New => "new",
            BuildState::Discovering => "discovering",
            BuildState::Pending => "pending",
            BuildState::Building => "building",
            BuildState::Succeeded => "succeeded",
            BuildState::Failed => "failed",
            BuildState::Contaminated => "contaminated",
            BuildState::Missing => "missing",
            BuildState::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        let trimmed = s
            .strip_prefix("DependencyBuildState")
            .or_else(|| s.strip_prefix("ArtifactBuild"))
            .unwrap_or(s);
        let normalized: String = trimmed
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "new" => BuildState::New,
            "discovering" | "analyzing" => BuildState::Discovering,
            "pending" | "submitted" => BuildState::Pending,
            "building" => BuildState::Building,
            "succeeded" | "success" | "complete" | "completed" => BuildState::Succeeded,
            "failed" | "failure" => BuildState::Failed,
            "contaminated" => BuildState::Contaminated,
            "missing" => BuildState::Missing,
            _ => BuildState::Other(s.to_string()),
        }
    }

    /// True once the build will not change state on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BuildState::Succeeded
                | BuildState::Failed
                | BuildState::Contaminated
                | BuildState::Missing
        )
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for BuildState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BuildState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(BuildState::parse(&s))
    }
}

// ─── BuildRecord ─────────────────────────────────────────────────────────────

/// Where a build's sources came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmCoordinates {
    pub repository: Option<String>,
    pub tag: Option<String>,
    pub commit: Option<String>,
    pub context_path: Option<String>,
}

/// A build history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub id: Option<i64>,
    pub name: String,
    pub scm: ScmCoordinates,
    pub state: BuildState,
    pub succeeded: bool,
    pub contaminated: bool,
    pub verified: bool,
    pub artifacts: Vec<Gav>,
    pub created_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BuildRecord {
    /// Wall-clock build time, if both ends are known.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) if end >= start => Some(end - start),
            _ => None,
        }
    }

    /// True if this build produced the given coordinate.
    pub fn produced(&self, gav: &Gav) -> bool {
        self.artifacts.iter().any(|a| a == gav)
    }
}

// ─── PagedResult ─────────────────────────────────────────────────────────────

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_count: u64,
}

impl<T> PagedResult<T> {
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.per_page))
    }

    /// True if no page follows this one. Pages are 0-indexed on the wire.
    pub fn is_last_page(&self) -> bool {
        u64::from(self.page) + 1 >= self.total_pages()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for PagedResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ─── DiscoveryLog ────────────────────────────────────────────────────────────

/// Discovery log payload, in whatever shape the server emits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscoveryLog {
    Json(serde_json::Value),
    Text(String),
    /// A non-JSON body that is not valid UTF-8, byte for byte.
    Bytes(Vec<u8>),
}

impl DiscoveryLog {
    /// Log content as display text.
    ///
    /// A JSON string is unwrapped; any other JSON value is pretty-printed.
    pub fn to_text(&self) -> String {
        match self {
            DiscoveryLog::Text(s) => s.clone(),
            DiscoveryLog::Json(serde_json::Value::String(s)) => s.clone(),
            DiscoveryLog::Json(v) => {
                serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
            }
            DiscoveryLog::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DiscoveryLog::Text(s) => s.is_empty(),
            DiscoveryLog::Json(serde_json::Value::Null) => true,
            DiscoveryLog::Json(serde_json::Value::String(s)) => s.is_empty(),
            DiscoveryLog::Json(_) => false,
            DiscoveryLog::Bytes(b) => b.is_empty(),
        }
    }
}

// ─── HistoryQuery ────────────────────────────────────────────────────────────

/// Filters and paging for the build history listing. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub gav: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub state: Option<String>,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gav(mut self, gav: impl Into<String>) -> Self {
        self.gav = Some(gav.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state_parses_server_spellings() {
        assert_eq!(BuildState::parse("complete"), BuildState::Succeeded);
        assert_eq!(BuildState::parse("DependencyBuildStateComplete"), BuildState::Succeeded);
        assert_eq!(BuildState::parse("ArtifactBuildFailed"), BuildState::Failed);
        assert_eq!(BuildState::parse("BUILDING"), BuildState::Building);
        assert_eq!(BuildState::parse("DependencyBuildStateAnalyzing"), BuildState::Discovering);
        assert_eq!(
            BuildState::parse("DependencyBuildStateSomethingElse"),
            BuildState::Other("DependencyBuildStateSomethingElse".to_string())
        );
    }

    #[test]
    fn test_build_state_terminal() {
        assert!(BuildState::Succeeded.is_terminal());
        assert!(BuildState::Contaminated.is_terminal());
        assert!(!BuildState::Building.is_terminal());
        assert!(!BuildState::Other("x".into()).is_terminal());
    }

    #[test]
    fn test_build_state_serde() {
        let s: BuildState = serde_json::from_str("\"ArtifactBuildNew\"").unwrap();
        assert_eq!(s, BuildState::New);
        assert_eq!(serde_json::to_string(&BuildState::Failed).unwrap(), "\"failed\"");
    }

    #[test]
    fn test_paged_result_total_pages() {
        let page = PagedResult::<u8> {
            items: vec![],
            page: 0,
            per_page: 20,
            total_count: 41,
        };
        assert_eq!(page.total_pages(), 3);
        assert!(!page.is_last_page());

        let last = PagedResult::<u8> { page: 2, ..page.clone() };
        assert!(last.is_last_page());

        let degenerate = PagedResult::<u8> { per_page: 0, ..page };
        assert_eq!(degenerate.total_pages(), 0);
    }

    #[test]
    fn test_discovery_log_text() {
        assert_eq!(DiscoveryLog::Text("line 1\n".into()).to_text(), "line 1\n");
        assert_eq!(
            DiscoveryLog::Json(serde_json::json!("plain")).to_text(),
            "plain"
        );
        let structured = DiscoveryLog::Json(serde_json::json!({"lines": ["a"]}));
        assert!(structured.to_text().contains("\"lines\""));
        assert!(DiscoveryLog::Json(serde_json::Value::Null).is_empty());
        assert!(!structured.is_empty());

        let bytes = DiscoveryLog::Bytes(vec![b'o', b'k', 0xff]);
        assert_eq!(bytes.to_text(), "ok\u{fffd}");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_history_query_builder() {
        let q = HistoryQuery::new()
            .with_gav("org:lib:1.0")
            .with_page(2)
            .with_per_page(20)
            .with_state(BuildState::Failed.as_str());
        assert_eq!(q.gav.as_deref(), Some("org:lib:1.0"));
        assert_eq!(q.page, Some(2));
        assert_eq!(q.per_page, Some(20));
        assert_eq!(q.state.as_deref(), Some("failed"));
        assert_eq!(HistoryQuery::new(), HistoryQuery::default());
    }
}
