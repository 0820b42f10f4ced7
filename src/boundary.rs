use std::fmt;

/// Non-fatal situations met while deriving a version.
/// These are reported to the user but do not stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The repository has no tags; the fallback version is used instead
    NoTagsFound { fallback: String },
    /// A tag matched the pattern but has no commit or timestamp attached
    IncompleteTag { tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTagsFound { fallback } => {
                write!(
                    f,
                    "Unable to find any tags, using fallback value '{}'",
                    fallback
                )
            }
            BoundaryWarning::IncompleteTag { tag } => {
                write!(
                    f,
                    "Skipping tag '{}': no commit date or hash could be resolved",
                    tag
                )
            }
        }
    }
}
