use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Suffix segment of a tag, e.g. `beta` or `beta.2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suffix {
    pub label: String,
    pub number: Option<u64>,
}

impl Suffix {
    pub fn new(label: impl Into<String>, number: Option<u64>) -> Self {
        Suffix {
            label: label.into(),
            number,
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(f, "{}.{}", self.label, number),
            None => f.write_str(&self.label),
        }
    }
}

/// Parts captured from a single tag match.
///
/// Optional components stay `None` when the tag does not carry them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    pub tag: String,
    pub prefix: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build: Option<u64>,
    pub suffix: Option<Suffix>,
}

/// A version found in the repository, tied to the commit it was tagged on.
///
/// Records are never mutated; incrementing produces a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub tag: String,
    pub prefix: String,
    pub suffix: Option<Suffix>,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build: u64,
    pub suffix_number: u64,
    pub commit: String,
    pub timestamp: DateTime<Utc>,
}

impl VersionRecord {
    /// Build a record from a parsed tag and the commit metadata it belongs to.
    ///
    /// A suffix without its own number takes the build number, so that
    /// `v1.0.0.3-beta` orders like `v1.0.0-beta.3`.
    pub fn from_parsed(
        parsed: ParsedTag,
        commit: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let build = parsed.build.unwrap_or(0);
        let suffix_number = match &parsed.suffix {
            Some(Suffix {
                number: Some(number),
                ..
            }) => *number,
            Some(Suffix { number: None, .. }) => build,
            None => 0,
        };

        VersionRecord {
            tag: parsed.tag,
            prefix: parsed.prefix,
            suffix: parsed.suffix,
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            build,
            suffix_number,
            commit: commit.into(),
            timestamp,
        }
    }

    /// The tuple versions are ordered by.
    pub fn precedence(&self) -> (u64, u64, u64, u64, u64) {
        (
            self.major,
            self.minor,
            self.patch,
            self.build,
            self.suffix_number,
        )
    }

    /// Compare by version precedence only; tag text and metadata are ignored.
    pub fn cmp_version(&self, other: &VersionRecord) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }

    /// `major.minor.patch.build`
    pub fn version(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }

    /// `major.minor.patch`
    pub fn short_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Suffix text as it appears in the tag, or an empty string.
    pub fn suffix_text(&self) -> String {
        self.suffix
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(build: Option<u64>, suffix: Option<Suffix>) -> ParsedTag {
        ParsedTag {
            tag: "v1.2.3".to_string(),
            prefix: "v".to_string(),
            major: 1,
            minor: 2,
            patch: 3,
            build,
            suffix,
        }
    }

    #[test]
    fn test_build_defaults_to_zero() {
        let record = VersionRecord::from_parsed(parsed(None, None), "abc", Utc::now());
        assert_eq!(record.build, 0);
        assert_eq!(record.suffix_number, 0);
        assert_eq!(record.version(), "1.2.3.0");
        assert_eq!(record.short_version(), "1.2.3");
    }

    #[test]
    fn test_explicit_suffix_number() {
        let record = VersionRecord::from_parsed(
            parsed(Some(4), Some(Suffix::new("beta", Some(2)))),
            "abc",
            Utc::now(),
        );
        assert_eq!(record.build, 4);
        assert_eq!(record.suffix_number, 2);
        assert_eq!(record.suffix_text(), "beta.2");
    }

    #[test]
    fn test_bare_suffix_mirrors_build() {
        let record = VersionRecord::from_parsed(
            parsed(Some(5), Some(Suffix::new("beta", None))),
            "abc",
            Utc::now(),
        );
        assert_eq!(record.suffix_number, 5);
        assert_eq!(record.suffix_text(), "beta");
    }

    #[test]
    fn test_cmp_version_ignores_metadata() {
        let a = VersionRecord::from_parsed(parsed(Some(1), None), "abc", Utc::now());
        let mut b = a.clone();
        b.tag = "release-1.2.3.1".to_string();
        b.commit = "def".to_string();
        assert_eq!(a.cmp_version(&b), Ordering::Equal);

        let c = VersionRecord::from_parsed(parsed(Some(2), None), "abc", Utc::now());
        assert_eq!(a.cmp_version(&c), Ordering::Less);
        assert_eq!(c.cmp_version(&a), Ordering::Greater);
    }
}
