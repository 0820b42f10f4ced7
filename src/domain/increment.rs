//! Auto-increment of a selected version.
//!
//! | mode   | major | minor | patch | build                  | suffix number          |
//! |--------|-------|-------|-------|------------------------|------------------------|
//! | none   | -     | -     | -     | -                      | -                      |
//! | major  | +1    | 0     | 0     | 0                      | -                      |
//! | minor  | -     | +1    | 0     | 0                      | -                      |
//! | patch  | -     | -     | +1    | 0                      | -                      |
//! | build  | -     | -     | -     | static or +1           | 0                      |
//! | suffix | -     | -     | -     | = new suffix number    | static or +1           |

use crate::config::{Config, IncrementMode};
use crate::domain::version::{Suffix, VersionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Numbers {
    major: u64,
    minor: u64,
    patch: u64,
    build: u64,
    suffix_number: u64,
}

impl Numbers {
    fn of(record: &VersionRecord) -> Self {
        Numbers {
            major: record.major,
            minor: record.minor,
            patch: record.patch,
            build: record.build,
            suffix_number: record.suffix_number,
        }
    }

    fn bump(self, mode: IncrementMode, static_number: Option<u64>) -> Self {
        match mode {
            IncrementMode::None => self,
            IncrementMode::Major => Numbers {
                major: self.major.saturating_add(1),
                minor: 0,
                patch: 0,
                build: 0,
                ..self
            },
            IncrementMode::Minor => Numbers {
                minor: self.minor.saturating_add(1),
                patch: 0,
                build: 0,
                ..self
            },
            IncrementMode::Patch => Numbers {
                patch: self.patch.saturating_add(1),
                build: 0,
                ..self
            },
            IncrementMode::Build => Numbers {
                build: static_number.unwrap_or_else(|| self.build.saturating_add(1)),
                suffix_number: 0,
                ..self
            },
            IncrementMode::Suffix => {
                let suffix_number =
                    static_number.unwrap_or_else(|| self.suffix_number.saturating_add(1));
                Numbers {
                    build: suffix_number,
                    suffix_number,
                    ..self
                }
            }
        }
    }
}

/// Compute the next version for `record` under the configured increment mode.
///
/// With [`IncrementMode::None`] the selected record is returned as is.
/// Otherwise the tag is rebuilt from the configured prefix and suffix rather
/// than the matched text.
pub fn next_version(record: &VersionRecord, config: &Config) -> VersionRecord {
    let mode = config.increment_mode;
    if mode == IncrementMode::None {
        return record.clone();
    }

    let numbers = Numbers::of(record).bump(mode, config.static_build_number);

    let suffix = config
        .suffix
        .as_ref()
        .filter(|label| !label.is_empty())
        .map(|label| {
            let number = (mode == IncrementMode::Suffix).then_some(numbers.suffix_number);
            Suffix::new(label.clone(), number)
        });

    let mut tag = format!(
        "{}{}.{}.{}",
        config.prefix, numbers.major, numbers.minor, numbers.patch
    );
    if numbers.build > 0 && mode != IncrementMode::Suffix {
        tag.push_str(&format!(".{}", numbers.build));
    }
    if let Some(suffix) = &suffix {
        tag.push_str(&format!("-{}", suffix));
    }

    tracing::info!(from = %record.tag, to = %tag, %mode, "incremented version");

    VersionRecord {
        tag,
        prefix: config.prefix.clone(),
        suffix,
        major: numbers.major,
        minor: numbers.minor,
        patch: numbers.patch,
        build: numbers.build,
        suffix_number: numbers.suffix_number,
        commit: record.commit.clone(),
        timestamp: record.timestamp,
    }
}
