// tests/integration_test.rs
use chrono::{TimeZone, Utc};
use git_tag_version::boundary::BoundaryWarning;
use git_tag_version::cli::Workflow;
use git_tag_version::config::{Config, IncrementMode, TagSelector};
use git_tag_version::git::{MockTagSource, RawTag};
use git_tag_version::output::WriterSink;
use git_tag_version::TagVersionError;

fn source(tags: &[&str]) -> MockTagSource {
    let mut source = MockTagSource::new();
    for tag in tags {
        source.add_tag(*tag);
    }
    source
}

fn outputs(resolution: &git_tag_version::cli::Resolution) -> Vec<(String, String)> {
    let mut sink = WriterSink::new(Vec::new());
    resolution.write_to(&mut sink).unwrap();
    String::from_utf8(sink.into_inner())
        .unwrap()
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn output<'a>(lines: &'a [(String, String)], key: &str) -> &'a str {
    lines
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| panic!("missing output {}", key))
}

#[tokio::test]
async fn test_selects_highest_tag() {
    let workflow = Workflow::new(Config::default()).unwrap();
    let resolution = workflow
        .run(&source(&["v1.2.3", "v1.3.0", "v1.2.9"]))
        .await
        .unwrap();

    assert_eq!(resolution.found.tag, "v1.3.0");
    assert!(resolution.next.is_none());

    let lines = outputs(&resolution);
    assert_eq!(output(&lines, "tag"), "v1.3.0");
    assert_eq!(output(&lines, "version"), "1.3.0.0");
    assert_eq!(output(&lines, "tag_prefix"), "v");
    assert_eq!(output(&lines, "tag_suffix"), "");
}

#[tokio::test]
async fn test_patch_increment() {
    let config = Config {
        increment_mode: IncrementMode::Patch,
        ..Config::default()
    };
    let resolution = Workflow::new(config)
        .unwrap()
        .run(&source(&["v1.2.3"]))
        .await
        .unwrap();

    assert_eq!(resolution.found.tag, "v1.2.3");
    let lines = outputs(&resolution);
    assert_eq!(output(&lines, "tag"), "v1.2.4");
    assert_eq!(output(&lines, "version"), "1.2.4.0");
}

#[tokio::test]
async fn test_build_increment_with_static_number() {
    let config = Config {
        increment_mode: IncrementMode::Build,
        static_build_number: Some(42),
        ..Config::default()
    };
    let resolution = Workflow::new(config)
        .unwrap()
        .run(&source(&["v1.2.3.5"]))
        .await
        .unwrap();

    let lines = outputs(&resolution);
    assert_eq!(output(&lines, "tag"), "v1.2.3.42");
    assert_eq!(output(&lines, "version"), "1.2.3.42");
    assert_eq!(output(&lines, "version_build"), "42");
}

#[tokio::test]
async fn test_fallback_when_no_tags() {
    let config = Config {
        fallback_value: "2.0.0".to_string(),
        ..Config::default()
    };
    let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let resolution = Workflow::new(config)
        .unwrap()
        .run_at(&MockTagSource::new(), now)
        .await
        .unwrap();

    assert_eq!(resolution.found.tag, "v2.0.0");
    assert_eq!(
        resolution.warnings,
        vec![BoundaryWarning::NoTagsFound {
            fallback: "2.0.0".to_string()
        }]
    );

    let lines = outputs(&resolution);
    assert_eq!(output(&lines, "tag"), "v2.0.0");
    assert_eq!(output(&lines, "version"), "2.0.0.0");
    assert_eq!(output(&lines, "commit"), "");
    assert_eq!(output(&lines, "date"), "2025-01-02T03:04:05.000Z");
}

#[tokio::test]
async fn test_fallback_per_branch() {
    let config = Config {
        tag_selector: TagSelector::PerBranch,
        ..Config::default()
    };
    let source = MockTagSource::new();
    let resolution = Workflow::new(config).unwrap().run(&source).await.unwrap();

    assert_eq!(resolution.found.tag, "v0.0.0");
    assert_eq!(source.requests(), vec![TagSelector::PerBranch]);
}

#[tokio::test]
async fn test_fallback_that_does_not_match_pattern() {
    let config = Config {
        fallback_value: "not-a-version".to_string(),
        ..Config::default()
    };
    let err = Workflow::new(config)
        .unwrap()
        .run(&MockTagSource::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TagVersionError::NoMatch(_)));
}

#[tokio::test]
async fn test_suffix_increment() {
    let config = Config {
        suffix: Some("beta".to_string()),
        increment_mode: IncrementMode::Suffix,
        ..Config::default()
    };
    let resolution = Workflow::new(config)
        .unwrap()
        .run(&source(&["v1.0.0-beta.2"]))
        .await
        .unwrap();

    let lines = outputs(&resolution);
    assert_eq!(output(&lines, "tag"), "v1.0.0-beta.3");
    assert_eq!(output(&lines, "tag_suffix"), "beta.3");
    assert_eq!(output(&lines, "version"), "1.0.0.3");
}

#[tokio::test]
async fn test_explicit_ref_without_tags_fails() {
    let config = Config {
        tag_selector: TagSelector::ExplicitRef("refs/tags/v9.9.9".to_string()),
        ..Config::default()
    };
    let source = MockTagSource::new();
    let err = Workflow::new(config).unwrap().run(&source).await.unwrap_err();

    assert!(matches!(err, TagVersionError::NoMatch(_)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        source.requests(),
        vec![TagSelector::ExplicitRef("refs/tags/v9.9.9".to_string())]
    );
}

#[tokio::test]
async fn test_existing_tags_without_match_fail() {
    let err = Workflow::new(Config::default())
        .unwrap()
        .run(&source(&["release-1", "nightly"]))
        .await
        .unwrap_err();
    assert!(matches!(err, TagVersionError::NoMatch(_)));
}

#[tokio::test]
async fn test_tag_source_failure_propagates() {
    let source = MockTagSource::failing("fatal: your current branch has no commits", Some(128));
    let err = Workflow::new(Config::default())
        .unwrap()
        .run(&source)
        .await
        .unwrap_err();
    assert!(matches!(err, TagVersionError::TagSource { .. }));
    assert_eq!(err.exit_code(), 128);
}

#[tokio::test]
async fn test_config_error_before_fetch() {
    let config = Config {
        prefix_pattern: Some("release-".to_string()),
        ..Config::default()
    };
    let err = Workflow::new(config).unwrap_err();
    assert!(err.to_string().contains("prefix pattern mismatch"));
}

#[tokio::test]
async fn test_equal_versions_keep_source_order() {
    let config = Config {
        prefix_pattern: Some("v|release-".to_string()),
        ..Config::default()
    };
    let resolution = Workflow::new(config)
        .unwrap()
        .run(&source(&["release-2.0.0", "v2.0.0", "v1.0.0"]))
        .await
        .unwrap();
    assert_eq!(resolution.found.tag, "release-2.0.0");

    let lines = outputs(&resolution);
    assert_eq!(output(&lines, "tag_prefix"), "release-");
}

#[tokio::test]
async fn test_increment_uses_configured_prefix() {
    let config = Config {
        prefix_pattern: Some("v|release-".to_string()),
        increment_mode: IncrementMode::Minor,
        ..Config::default()
    };
    let resolution = Workflow::new(config)
        .unwrap()
        .run(&source(&["release-2.4.1"]))
        .await
        .unwrap();

    let lines = outputs(&resolution);
    assert_eq!(output(&lines, "tag"), "v2.5.0");
    assert_eq!(output(&lines, "tag_prefix"), "v");
}

#[tokio::test]
async fn test_incomplete_tags_are_skipped_with_warning() {
    let mut source = source(&["v1.0.0"]);
    source.add_raw(RawTag {
        name: "v3.0.0".to_string(),
        timestamp: None,
        commit: Some("abc".to_string()),
        synthetic: false,
    });

    let resolution = Workflow::new(Config::default())
        .unwrap()
        .run(&source)
        .await
        .unwrap();
    assert_eq!(resolution.found.tag, "v1.0.0");
    assert_eq!(
        resolution.warnings,
        vec![BoundaryWarning::IncompleteTag {
            tag: "v3.0.0".to_string()
        }]
    );
}

#[tokio::test]
async fn test_bare_suffix_orders_by_build() {
    let config = Config {
        suffix: Some("beta".to_string()),
        ..Config::default()
    };
    let resolution = Workflow::new(config)
        .unwrap()
        .run(&source(&["v1.0.0-beta.2", "v1.0.0.3-beta", "v1.0.0-beta.1"]))
        .await
        .unwrap();
    assert_eq!(resolution.found.tag, "v1.0.0.3-beta");
}

#[tokio::test]
async fn test_outputs_of_found_version_without_increment() {
    let config = Config {
        suffix: Some("rc".to_string()),
        ..Config::default()
    };
    let resolution = Workflow::new(config)
        .unwrap()
        .run(&source(&["v3.1.4.1-rc.5"]))
        .await
        .unwrap();

    let lines = outputs(&resolution);
    assert_eq!(output(&lines, "tag"), "v3.1.4.1-rc.5");
    assert_eq!(output(&lines, "tag_suffix"), "rc.5");
    assert_eq!(output(&lines, "version"), "3.1.4.1");
    assert_eq!(output(&lines, "version_short"), "3.1.4");
    assert_eq!(output(&lines, "version_major"), "3");
    assert_eq!(output(&lines, "version_minor"), "1");
    assert_eq!(output(&lines, "version_patch"), "4");
    assert_eq!(output(&lines, "version_build"), "1");
    assert_eq!(output(&lines, "commit_short").len(), 7);
    assert_eq!(output(&lines, "date_weekday"), "Saturday");
}

#[tokio::test]
async fn test_incremented_tag_parses_back_to_same_numbers() {
    for mode in [
        IncrementMode::Major,
        IncrementMode::Minor,
        IncrementMode::Patch,
        IncrementMode::Build,
    ] {
        let config = Config {
            increment_mode: mode,
            ..Config::default()
        };
        let workflow = Workflow::new(config).unwrap();
        let resolution = workflow.run(&source(&["v4.5.6.7"])).await.unwrap();
        let next = resolution.next.unwrap();

        let reparsed = workflow.pattern().parse(&next.tag).unwrap();
        assert_eq!(reparsed.major, next.major, "mode {}", mode);
        assert_eq!(reparsed.minor, next.minor, "mode {}", mode);
        assert_eq!(reparsed.patch, next.patch, "mode {}", mode);
        assert_eq!(reparsed.build.unwrap_or(0), next.build, "mode {}", mode);
    }
}
