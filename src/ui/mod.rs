//! User interface module - console reporting.
//!
//! `formatter` holds the styled message helpers; this module adds the
//! composite reports printed at the end of a run.

pub mod formatter;

pub use formatter::{display_boundary_warning, display_error, display_status, display_success};

use crate::domain::VersionRecord;

/// Report the selected tag and, when incrementing, the computed next tag.
///
/// The found version always shows the build component, using `.0` when the
/// tag had none.
pub fn display_resolution(found: &VersionRecord, next: Option<&VersionRecord>) {
    display_success(&format!("Found tag: {}", found.tag));
    display_success(&format!("Found version: {}", found.version()));

    if let Some(next) = next {
        display_success(&format!("Next tag: {}", next.tag));
        display_success(&format!("Next version: {}", next.version()));
    }
}
