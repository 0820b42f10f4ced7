//! Main workflow orchestration logic
//!
//! Runs the version derivation pipeline: fetch tags, apply the fallback
//! policy, match candidates, select the highest version and increment it.
//! Argument parsing and console output stay in the binary.

use chrono::{DateTime, Utc};

use crate::analyzer::{collect_candidates, fallback, select_highest};
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{next_version, TagPattern, VersionRecord};
use crate::error::Result;
use crate::git::TagSource;
use crate::output::{write_outputs, OutputSink};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The highest matching version in the repository
    pub found: VersionRecord,
    /// The incremented version, when an increment mode is active
    pub next: Option<VersionRecord>,
    /// Non-fatal issues met along the way
    pub warnings: Vec<BoundaryWarning>,
}

impl Resolution {
    /// The version whose outputs are emitted: the next one if any
    pub fn emitted(&self) -> &VersionRecord {
        self.next.as_ref().unwrap_or(&self.found)
    }

    /// Write the emitted version's outputs to `sink`
    pub fn write_to<S: OutputSink + ?Sized>(&self, sink: &mut S) -> std::io::Result<()> {
        write_outputs(self.emitted(), sink)
    }
}

/// Validated configuration together with its compiled tag pattern.
///
/// Construction fails on any configuration error, before a tag source is
/// ever contacted.
#[derive(Debug, Clone)]
pub struct Workflow {
    config: Config,
    pattern: TagPattern,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let pattern = TagPattern::compile(&config)?;
        Ok(Workflow { config, pattern })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pattern(&self) -> &TagPattern {
        &self.pattern
    }

    /// Derive the version from the tags `source` reports.
    pub async fn run<S: TagSource + ?Sized>(&self, source: &S) -> Result<Resolution> {
        self.run_at(source, Utc::now()).await
    }

    /// Like [`Workflow::run`], with `now` as the fallback record's timestamp.
    pub async fn run_at<S: TagSource + ?Sized>(
        &self,
        source: &S,
        now: DateTime<Utc>,
    ) -> Result<Resolution> {
        let tags = source.fetch(&self.config.tag_selector).await?;
        tracing::info!(
            count = tags.len(),
            selector = ?self.config.tag_selector,
            "fetched tags"
        );

        let (tags, fallback_warning) = fallback::ensure_tags(&self.config, tags, now)?;
        let candidates = collect_candidates(&self.pattern, &tags);

        let mut warnings: Vec<BoundaryWarning> = fallback_warning.into_iter().collect();
        warnings.extend(candidates.warnings.iter().cloned());

        let found = select_highest(&candidates.records)
            .ok_or_else(|| fallback::no_candidates(&self.config, tags.len()))?
            .clone();
        tracing::info!(
            tag = %found.tag,
            version = %found.version(),
            candidates = candidates.records.len(),
            "selected version"
        );

        let next = self
            .config
            .increment_mode
            .is_active()
            .then(|| next_version(&found, &self.config));

        Ok(Resolution {
            found,
            next,
            warnings,
        })
    }
}
