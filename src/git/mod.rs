//! Tag retrieval abstraction layer
//!
//! This module provides a trait-based abstraction over listing tags,
//! allowing for multiple implementations including real Git repositories
//! and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [TagSource] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2TagSource]: reads refs with the `git2` crate
//! - [command::GitCliTagSource]: shells out to the `git` binary
//! - [mock::MockTagSource]: canned records for testing
//!
//! Every implementation returns records in the order the versions should be
//! considered in: most recent first for tag listings, history order for
//! per-branch traversal.

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCliTagSource;
pub use mock::MockTagSource;
pub use repository::Git2TagSource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::TagSelector;
use crate::error::Result;

/// One tag as reported by a tag source.
///
/// Commit metadata is optional because a source may list a tag it cannot
/// correlate with a commit; such records are skipped during matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub name: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub commit: Option<String>,
    /// Set for the record synthesized from the fallback version.
    pub synthetic: bool,
}

impl RawTag {
    /// A tag with full commit metadata
    pub fn new(
        name: impl Into<String>,
        timestamp: DateTime<Utc>,
        commit: impl Into<String>,
    ) -> Self {
        RawTag {
            name: name.into(),
            timestamp: Some(timestamp),
            commit: Some(commit.into()),
            synthetic: false,
        }
    }

    /// Whether this record carries the metadata needed to become a candidate.
    pub fn is_eligible(&self) -> bool {
        if self.synthetic {
            return self.timestamp.is_some();
        }
        self.timestamp.is_some()
            && self
                .commit
                .as_deref()
                .is_some_and(|commit| !commit.trim().is_empty())
    }
}

/// Source of tag records for version derivation.
///
/// ## Error Handling
///
/// A failed retrieval is reported as [crate::error::TagVersionError::TagSource]
/// (or `Git` for libgit2 failures) and ends the run; there are no retries.
#[async_trait]
pub trait TagSource: Send + Sync {
    /// List the tags selected by `selector`, in consideration order.
    ///
    /// An empty list is not an error; deciding what happens next is up to
    /// the caller.
    async fn fetch(&self, selector: &TagSelector) -> Result<Vec<RawTag>>;
}

/// Sort records most recent first; records without a timestamp go last.
/// The sort is stable, so equal timestamps keep their listing order.
pub(crate) fn sort_recent_first(tags: &mut [RawTag]) {
    tags.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
