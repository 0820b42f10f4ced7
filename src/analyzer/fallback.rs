use chrono::{DateTime, Utc};

use crate::boundary::BoundaryWarning;
use crate::config::{Config, TagSelector};
use crate::error::{Result, TagVersionError};
use crate::git::RawTag;

/// Tag text for the fallback version, with the configured prefix added
/// unless the fallback already starts with it.
pub fn fallback_tag(config: &Config) -> String {
    if config.fallback_value.starts_with(&config.prefix) {
        config.fallback_value.clone()
    } else {
        format!("{}{}", config.prefix, config.fallback_value)
    }
}

/// The synthetic record standing in for a repository without tags.
///
/// It carries `now` as its timestamp and no commit.
pub fn synthesize(config: &Config, now: DateTime<Utc>) -> RawTag {
    RawTag {
        name: fallback_tag(config),
        timestamp: Some(now),
        commit: None,
        synthetic: true,
    }
}

/// Handle an empty tag listing.
///
/// Non-empty listings pass through unchanged. An empty listing for an
/// explicit tag is fatal; for the other selectors the fallback record
/// replaces it.
pub fn ensure_tags(
    config: &Config,
    tags: Vec<RawTag>,
    now: DateTime<Utc>,
) -> Result<(Vec<RawTag>, Option<BoundaryWarning>)> {
    if !tags.is_empty() {
        return Ok((tags, None));
    }

    match &config.tag_selector {
        TagSelector::ExplicitRef(reference) => Err(TagVersionError::no_match(format!(
            "unable to find a match on the given tag '{}'",
            reference
        ))),
        TagSelector::PerBranch | TagSelector::AllTags => {
            let record = synthesize(config, now);
            tracing::warn!(tag = %record.name, "no tags found, using fallback");
            let warning = BoundaryWarning::NoTagsFound {
                fallback: config.fallback_value.clone(),
            };
            Ok((vec![record], Some(warning)))
        }
    }
}

/// Error for a scan that produced no candidates.
pub fn no_candidates(config: &Config, scanned: usize) -> TagVersionError {
    match &config.tag_selector {
        TagSelector::ExplicitRef(reference) => TagVersionError::no_match(format!(
            "tag '{}' does not match the configured pattern",
            reference
        )),
        _ => TagVersionError::no_match(format!(
            "none of the {} tag(s) found match the configured pattern",
            scanned
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(selector: TagSelector) -> Config {
        Config {
            tag_selector: selector,
            fallback_value: "2.0.0".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_fallback_tag_adds_prefix() {
        assert_eq!(fallback_tag(&config(TagSelector::AllTags)), "v2.0.0");
    }

    #[test]
    fn test_fallback_tag_keeps_existing_prefix() {
        let config = Config {
            fallback_value: "v3.1.0".to_string(),
            ..config(TagSelector::AllTags)
        };
        assert_eq!(fallback_tag(&config), "v3.1.0");
    }

    #[test]
    fn test_empty_listing_synthesizes_record() {
        let now = Utc::now();
        for selector in [TagSelector::AllTags, TagSelector::PerBranch] {
            let (tags, warning) = ensure_tags(&config(selector), Vec::new(), now).unwrap();
            assert_eq!(tags.len(), 1);
            assert_eq!(tags[0].name, "v2.0.0");
            assert_eq!(tags[0].timestamp, Some(now));
            assert!(tags[0].synthetic);
            assert!(tags[0].is_eligible());
            assert_eq!(
                warning,
                Some(BoundaryWarning::NoTagsFound {
                    fallback: "2.0.0".to_string()
                })
            );
        }
    }

    #[test]
    fn test_explicit_ref_never_falls_back() {
        let config = config(TagSelector::ExplicitRef("refs/tags/v9.9.9".to_string()));
        let err = ensure_tags(&config, Vec::new(), Utc::now()).unwrap_err();
        assert!(matches!(err, TagVersionError::NoMatch(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_existing_tags_pass_through() {
        let tags = vec![RawTag::new("whatever", Utc::now(), "abc")];
        let (passed, warning) =
            ensure_tags(&config(TagSelector::AllTags), tags.clone(), Utc::now()).unwrap();
        assert_eq!(passed, tags);
        assert!(warning.is_none());
    }
}
