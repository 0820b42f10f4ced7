use crate::boundary::BoundaryWarning;
use crate::domain::{TagPattern, VersionRecord};
use crate::git::RawTag;

/// Result of scanning tag records against the pattern
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    /// Matching versions, in the order the records were supplied
    pub records: Vec<VersionRecord>,
    /// Matching tags that were skipped for missing metadata
    pub warnings: Vec<BoundaryWarning>,
}

impl Candidates {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Scan every record and collect all tags matching the pattern.
///
/// Records without a timestamp or commit are skipped. The scan does not stop
/// at the first match.
pub fn collect_candidates<'a, I>(pattern: &TagPattern, tags: I) -> Candidates
where
    I: IntoIterator<Item = &'a RawTag>,
{
    let mut candidates = Candidates::default();

    for raw in tags {
        let Some(parsed) = pattern.parse(&raw.name) else {
            tracing::trace!(tag = %raw.name, "tag does not match pattern");
            continue;
        };

        let timestamp = match raw.timestamp {
            Some(timestamp) if raw.is_eligible() => timestamp,
            _ => {
                tracing::debug!(tag = %raw.name, "skipping tag without commit metadata");
                candidates.warnings.push(BoundaryWarning::IncompleteTag {
                    tag: raw.name.clone(),
                });
                continue;
            }
        };

        let commit = raw.commit.clone().unwrap_or_default();
        tracing::debug!(tag = %raw.name, %commit, "candidate tag");
        candidates
            .records
            .push(VersionRecord::from_parsed(parsed, commit, timestamp));
    }

    candidates
}
