//! Wire types for build history responses.

use crate::shared::serde_util::timestamp_opt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// REST response for a single build.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub scm_repo: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub commit: Option<String>,
    #[serde(default)]
    pub context_path: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub succeeded: Option<bool>,
    #[serde(default)]
    pub contaminated: Option<bool>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub artifacts: Vec<String>,
    #[serde(default, alias = "creationTimestamp", with = "timestamp_opt")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp_opt")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp_opt")]
    pub end_time: Option<DateTime<Utc>>,
}

/// REST response for a paged listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageParameters<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

/// REST response for the build history listing.
pub type BuildPage = PageParameters<BuildDto>;
