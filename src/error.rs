use thiserror::Error;

/// Unified error type for git-tag-version operations
#[derive(Error, Debug)]
pub enum TagVersionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag source error: {message}")]
    TagSource {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("No matching tag: {0}")]
    NoMatch(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-tag-version
pub type Result<T> = std::result::Result<T, TagVersionError>;

impl TagVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagVersionError::Config(msg.into())
    }

    /// Create a tag source error without a known exit status
    pub fn tag_source(msg: impl Into<String>) -> Self {
        TagVersionError::TagSource {
            message: msg.into(),
            exit_code: None,
        }
    }

    /// Create a no-match error with context
    pub fn no_match(msg: impl Into<String>) -> Self {
        TagVersionError::NoMatch(msg.into())
    }

    /// Process exit status for this error.
    ///
    /// A tag source failure that carries the exit status of the underlying
    /// command reports that status; everything else exits with `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            TagVersionError::TagSource {
                exit_code: Some(code),
                ..
            } => u8::try_from(*code)
                .ok()
                .filter(|code| *code != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }
}
