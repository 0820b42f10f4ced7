use regex::{Captures, Regex};

use crate::config::Config;
use crate::domain::version::{ParsedTag, Suffix};
use crate::error::{Result, TagVersionError};

/// Compiled tag-matching pattern.
///
/// The pattern has the shape
/// `^<prefix><major>.<minor>.<patch>(.<build>)?(-<suffix>(.<number>)?)?$`,
/// where the suffix part only exists when suffix matching is enabled.
#[derive(Debug, Clone)]
pub struct TagPattern {
    regex: Regex,
}

impl TagPattern {
    /// Build the pattern from configuration.
    ///
    /// A prefix or suffix sub-pattern must match its literal counterpart as
    /// a whole; otherwise the configuration is rejected.
    pub fn compile(config: &Config) -> Result<Self> {
        let prefix = match &config.prefix_pattern {
            Some(pattern) => {
                ensure_matches_literal(pattern, &config.prefix, "prefix")?;
                format!("(?:{})", pattern)
            }
            None => regex::escape(&config.prefix),
        };

        let suffix = if config.suffix_enabled() {
            let literal = config.suffix.as_deref().unwrap_or("");
            Some(match &config.suffix_pattern {
                Some(pattern) => {
                    ensure_matches_literal(pattern, literal, "suffix")?;
                    format!("(?:{})", pattern)
                }
                None => regex::escape(literal),
            })
        } else {
            None
        };

        let mut source = format!(
            r"^(?P<prefix>{})(?P<version>(?P<major>[0-9]+)\.(?P<minor>[0-9]+)\.(?P<patch>[0-9]+)(?:\.(?P<build>[0-9]+))?)",
            prefix
        );
        if let Some(suffix) = suffix {
            source.push_str(&format!(
                r"(?:-(?P<suffix>{})(?:\.(?P<suffix_number>[0-9]+))?)?",
                suffix
            ));
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| {
            TagVersionError::config(format!("cannot compile tag pattern: {}", e))
        })?;
        tracing::debug!(pattern = %regex.as_str(), "compiled tag pattern");

        Ok(TagPattern { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Match a tag and extract its components.
    ///
    /// Numbers too large to represent are treated as a non-match.
    pub fn parse(&self, tag: &str) -> Option<ParsedTag> {
        let captures = self.regex.captures(tag)?;

        let suffix = match captures.name("suffix") {
            Some(label) => Some(Suffix::new(
                label.as_str(),
                optional_number(&captures, "suffix_number")?,
            )),
            None => None,
        };

        Some(ParsedTag {
            tag: tag.to_string(),
            prefix: captures.name("prefix")?.as_str().to_string(),
            major: captures.name("major")?.as_str().parse().ok()?,
            minor: captures.name("minor")?.as_str().parse().ok()?,
            patch: captures.name("patch")?.as_str().parse().ok()?,
            build: optional_number(&captures, "build")?,
            suffix,
        })
    }
}

/// `Some(None)` when the group did not participate, `None` when it did but
/// does not fit in a `u64`.
fn optional_number(captures: &Captures<'_>, group: &str) -> Option<Option<u64>> {
    match captures.name(group) {
        Some(m) => m.as_str().parse().ok().map(Some),
        None => Some(None),
    }
}

fn ensure_matches_literal(pattern: &str, literal: &str, what: &str) -> Result<()> {
    let anchored = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
        TagVersionError::config(format!("invalid {} pattern \"{}\": {}", what, pattern, e))
    })?;

    if anchored.is_match(literal) {
        Ok(())
    } else {
        Err(TagVersionError::config(format!(
            "{what} pattern mismatch: \"{pattern}\" must match {what} \"{literal}\""
        )))
    }
}
