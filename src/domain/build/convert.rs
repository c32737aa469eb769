//! Conversions from wire types to domain types for builds.

use super::wire::{BuildDto, PageParameters};
use super::{BuildRecord, BuildState, PagedResult, ScmCoordinates};
use crate::shared::Gav;

impl From<BuildDto> for BuildRecord {
    fn from(b: BuildDto) -> Self {
        let artifacts = b.artifacts.into_iter().map(Gav::from_raw).collect();

        let state = match (&b.state, b.succeeded, b.contaminated) {
            (Some(s), _, _) => BuildState::parse(s),
            (None, _, Some(true)) => BuildState::Contaminated,
            (None, Some(true), _) => BuildState::Succeeded,
            (None, Some(false), _) => BuildState::Failed,
            (None, None, _) => BuildState::Pending,
        };

        Self {
            id: b.id,
            name: b.name,
            scm: ScmCoordinates {
                repository: b.scm_repo,
                tag: b.tag,
                commit: b.commit,
                context_path: b.context_path,
            },
            succeeded: b.succeeded.unwrap_or(state == BuildState::Succeeded),
            contaminated: b.contaminated.unwrap_or(state == BuildState::Contaminated),
            verified: b.verified.unwrap_or(false),
            state,
            artifacts,
            created_at: b.timestamp,
            started_at: b.start_time,
            finished_at: b.end_time,
        }
    }
}

impl From<PageParameters<BuildDto>> for PagedResult<BuildRecord> {
    fn from(p: PageParameters<BuildDto>) -> Self {
        Self {
            items: p.items.into_iter().map(BuildRecord::from).collect(),
            page: p.page,
            per_page: p.per_page,
            total_count: p.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build::wire::BuildPage;

    fn sample_build_dto() -> BuildDto {
        BuildDto {
            id: Some(7),
            name: "commons-io-2.11.0-abc123".to_string(),
            scm_repo: Some("https://github.com/apache/commons-io.git".to_string()),
            tag: Some("rel/commons-io-2.11.0".to_string()),
            commit: Some("abc123".to_string()),
            context_path: None,
            state: Some("DependencyBuildStateComplete".to_string()),
            succeeded: Some(true),
            contaminated: Some(false),
            verified: Some(true),
            artifacts: vec!["commons-io:commons-io:2.11.0".to_string()],
            timestamp: chrono::DateTime::from_timestamp_millis(1740076800000),
            start_time: chrono::DateTime::from_timestamp_millis(1740076800000),
            end_time: chrono::DateTime::from_timestamp_millis(1740077100000),
        }
    }

    #[test]
    fn test_build_dto_conversion() {
        let record = BuildRecord::from(sample_build_dto());
        assert_eq!(record.id, Some(7));
        assert_eq!(record.name, "commons-io-2.11.0-abc123");
        assert_eq!(record.state, BuildState::Succeeded);
        assert!(record.succeeded);
        assert!(record.verified);
        assert_eq!(record.scm.tag.as_deref(), Some("rel/commons-io-2.11.0"));
        assert!(record.produced(&Gav::new("commons-io", "commons-io", "2.11.0")));
        assert_eq!(record.duration(), Some(chrono::Duration::seconds(300)));
    }

    #[test]
    fn test_state_derived_from_flags_when_absent() {
        let dto = BuildDto {
            state: None,
            succeeded: Some(false),
            contaminated: None,
            ..sample_build_dto()
        };
        let record = BuildRecord::from(dto);
        assert_eq!(record.state, BuildState::Failed);
        assert!(!record.contaminated);

        let dto = BuildDto {
            state: None,
            succeeded: None,
            contaminated: Some(true),
            ..sample_build_dto()
        };
        let record = BuildRecord::from(dto);
        assert_eq!(record.state, BuildState::Contaminated);
        assert!(!record.succeeded);
    }

    #[test]
    fn test_malformed_artifact_passes_through() {
        let dto = BuildDto {
            artifacts: vec!["org.acme:widget".to_string(), "org:lib:1.0".to_string()],
            ..sample_build_dto()
        };
        let record = BuildRecord::from(dto);
        assert_eq!(record.artifacts.len(), 2);
        assert_eq!(record.artifacts[0].as_str(), "org.acme:widget");
        assert!(!record.artifacts[0].is_well_formed());
        assert!(record.produced(&Gav::new("org", "lib", "1.0")));
    }

    #[test]
    fn test_empty_name_passes_through() {
        let dto = BuildDto {
            name: String::new(),
            ..sample_build_dto()
        };
        let record = BuildRecord::from(dto);
        assert_eq!(record.name, "");
        assert_eq!(record.state, BuildState::Succeeded);
    }

    #[test]
    fn test_page_conversion_from_json() {
        let json = r#"{
            "items": [
                {"name": "b1", "state": "complete", "artifacts": ["org:lib:1.0"], "timestamp": 1740076800000},
                {"name": "b2", "state": "building"},
                {"name": "b3", "artifacts": ["not-a-gav"]}
            ],
            "count": 42,
            "page": 2,
            "perPage": 20
        }"#;
        let page: BuildPage = serde_json::from_str(json).unwrap();
        let result = PagedResult::from(page);
        assert_eq!(result.page, 2);
        assert_eq!(result.per_page, 20);
        assert_eq!(result.total_count, 42);
        assert_eq!(result.total_pages(), 3);
        assert_eq!(result.len(), 3);
        assert_eq!(result.items[0].state, BuildState::Succeeded);
        assert_eq!(result.items[1].state, BuildState::Building);
        assert!(result.items[1].artifacts.is_empty());
        assert_eq!(result.items[2].artifacts[0].as_str(), "not-a-gav");
    }
}
