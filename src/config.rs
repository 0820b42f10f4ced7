use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, TagVersionError};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "git-tag-version.toml";

/// File name looked up in the user configuration directory.
pub const USER_CONFIG_FILE_NAME: &str = ".git-tag-version.toml";

pub const DEFAULT_PREFIX: &str = "v";
pub const DEFAULT_FALLBACK: &str = "0.0.0";

/// Raw option mapping, before defaults and validation are applied.
///
/// Every key is optional. Values come from a TOML file, the environment and
/// the command line; [`Settings::overlay`] merges them in precedence order.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub fallback: Option<String>,

    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub prefix_regex: Option<String>,

    #[serde(default)]
    pub suffix: Option<String>,

    #[serde(default)]
    pub suffix_regex: Option<String>,

    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_string")]
    pub branch: Option<String>,

    #[serde(default)]
    pub increment: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_string")]
    pub build_number: Option<String>,
}

/// Accepts booleans and integers as well as strings, so `branch = true` and
/// `buildNumber = 42` read the same as their quoted forms.
fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Integer(i64),
        Text(String),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Bool(value) => value.to_string(),
        Scalar::Integer(value) => value.to_string(),
        Scalar::Text(value) => value,
    }))
}

impl Settings {
    /// Layer `other` on top of `self`; keys set in `other` win.
    pub fn overlay(self, other: Settings) -> Settings {
        Settings {
            fallback: other.fallback.or(self.fallback),
            prefix: other.prefix.or(self.prefix),
            prefix_regex: other.prefix_regex.or(self.prefix_regex),
            suffix: other.suffix.or(self.suffix),
            suffix_regex: other.suffix_regex.or(self.suffix_regex),
            tag: other.tag.or(self.tag),
            branch: other.branch.or(self.branch),
            increment: other.increment.or(self.increment),
            build_number: other.build_number.or(self.build_number),
        }
    }
}

/// Which version component advances when computing the next version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncrementMode {
    #[default]
    None,
    Major,
    Minor,
    Patch,
    Build,
    Suffix,
}

impl IncrementMode {
    /// Interpret the `increment` option.
    ///
    /// Absent, empty and `"false"` disable incrementing. Otherwise the value
    /// must name one of the five modes, ignoring case.
    pub fn from_input(input: Option<&str>) -> Result<Self> {
        match input.map(str::trim) {
            None | Some("") => Ok(IncrementMode::None),
            Some(value) if value.eq_ignore_ascii_case("false") => Ok(IncrementMode::None),
            Some(value) => value.parse(),
        }
    }

    pub fn is_active(&self) -> bool {
        *self != IncrementMode::None
    }
}

impl FromStr for IncrementMode {
    type Err = TagVersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(IncrementMode::Major),
            "minor" => Ok(IncrementMode::Minor),
            "patch" => Ok(IncrementMode::Patch),
            "build" => Ok(IncrementMode::Build),
            "suffix" => Ok(IncrementMode::Suffix),
            _ => Err(TagVersionError::config(format!(
                "invalid increment mode \"{}\"; valid values are \"major\", \"minor\", \"patch\", \"build\", \"suffix\"",
                s
            ))),
        }
    }
}

impl fmt::Display for IncrementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IncrementMode::None => "none",
            IncrementMode::Major => "major",
            IncrementMode::Minor => "minor",
            IncrementMode::Patch => "patch",
            IncrementMode::Build => "build",
            IncrementMode::Suffix => "suffix",
        };
        f.write_str(name)
    }
}

/// Which tags the tag source is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSelector {
    /// A single tag name (or tag glob), or a full `refs/...` reference.
    ExplicitRef(String),
    /// Tags reachable from HEAD, in history order.
    PerBranch,
    /// Every tag in the repository, most recent first.
    AllTags,
}

/// Validated, immutable configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Literal prefix, also used for newly computed tags.
    pub prefix: String,
    /// Sub-pattern that replaces the literal prefix while matching.
    pub prefix_pattern: Option<String>,
    /// Literal suffix, also used for newly computed tags.
    pub suffix: Option<String>,
    /// Sub-pattern that replaces the literal suffix while matching.
    pub suffix_pattern: Option<String>,
    /// Seed version used when the repository has no tags.
    pub fallback_value: String,
    pub increment_mode: IncrementMode,
    /// Replaces the computed number for the `build` and `suffix` modes.
    pub static_build_number: Option<u64>,
    pub tag_selector: TagSelector,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prefix: DEFAULT_PREFIX.to_string(),
            prefix_pattern: None,
            suffix: None,
            suffix_pattern: None,
            fallback_value: DEFAULT_FALLBACK.to_string(),
            increment_mode: IncrementMode::None,
            static_build_number: None,
            tag_selector: TagSelector::AllTags,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Config {
    /// Apply defaults to raw settings and validate the scalar options.
    ///
    /// Pattern consistency is checked separately when the tag pattern is
    /// compiled, see [`crate::domain::TagPattern::compile`].
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let increment_mode = IncrementMode::from_input(settings.increment.as_deref())?;

        let static_build_number = match non_empty(settings.build_number) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                TagVersionError::config(format!(
                    "invalid build number \"{}\"; expected a non-negative integer",
                    raw
                ))
            })?),
            None => None,
        };

        let per_branch = settings
            .branch
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        let tag_selector = match non_empty(settings.tag) {
            Some(reference) => TagSelector::ExplicitRef(reference),
            None if per_branch => TagSelector::PerBranch,
            None => TagSelector::AllTags,
        };

        Ok(Config {
            prefix: settings
                .prefix
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            prefix_pattern: non_empty(settings.prefix_regex),
            suffix: non_empty(settings.suffix),
            suffix_pattern: non_empty(settings.suffix_regex),
            fallback_value: non_empty(settings.fallback)
                .unwrap_or_else(|| DEFAULT_FALLBACK.to_string()),
            increment_mode,
            static_build_number,
            tag_selector,
        })
    }

    /// Suffix matching is enabled when either a literal suffix or a suffix
    /// pattern is configured.
    pub fn suffix_enabled(&self) -> bool {
        self.suffix.is_some() || self.suffix_pattern.is_some()
    }
}

/// Loads settings from a TOML file, or returns empty settings.
///
/// Looks in the following order:
/// 1. Custom path provided as parameter
/// 2. `git-tag-version.toml` in the current directory
/// 3. `.git-tag-version.toml` in the user config directory
///
/// A missing file is not an error; a file that exists but cannot be read or
/// parsed is.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE_NAME);
        if user_path.exists() {
            fs::read_to_string(user_path)?
        } else {
            return Ok(Settings::default());
        }
    } else {
        return Ok(Settings::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| TagVersionError::config(format!("cannot parse configuration file: {}", e)))
}
