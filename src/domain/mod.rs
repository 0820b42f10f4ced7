//! Domain logic - pure version rules independent of git operations

pub mod increment;
pub mod pattern;
pub mod version;

pub use increment::next_version;
pub use pattern::TagPattern;
pub use version::{ParsedTag, Suffix, VersionRecord};
