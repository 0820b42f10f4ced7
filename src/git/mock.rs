use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;

use crate::config::TagSelector;
use crate::error::{Result, TagVersionError};
use crate::git::{RawTag, TagSource};

/// Mock tag source for testing without a repository
///
/// Returns its records verbatim, in insertion order, whatever the selector.
pub struct MockTagSource {
    tags: Vec<RawTag>,
    failure: Option<(String, Option<i32>)>,
    requests: Mutex<Vec<TagSelector>>,
}

impl MockTagSource {
    /// Create a new empty mock source
    pub fn new() -> Self {
        MockTagSource {
            tags: Vec::new(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A source whose every fetch fails with the given message and exit code
    pub fn failing(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        MockTagSource {
            failure: Some((message.into(), exit_code)),
            ..Self::new()
        }
    }

    /// Add a tag with commit metadata.
    ///
    /// Timestamps are one day apart, decreasing with each added tag, so
    /// insertion order matches a recency-sorted listing.
    pub fn add_tag(&mut self, name: impl Into<String>) -> &mut Self {
        let commit = format!("{:040x}", self.tags.len() + 1);
        let timestamp = Self::base_time() - chrono::Duration::days(self.tags.len() as i64);
        self.tags.push(RawTag::new(name, timestamp, commit));
        self
    }

    /// Add an arbitrary record
    pub fn add_raw(&mut self, tag: RawTag) -> &mut Self {
        self.tags.push(tag);
        self
    }

    /// Selectors passed to `fetch`, oldest first
    pub fn requests(&self) -> Vec<TagSelector> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }
}

impl Default for MockTagSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagSource for MockTagSource {
    async fn fetch(&self, selector: &TagSelector) -> Result<Vec<RawTag>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(selector.clone());
        }

        match &self.failure {
            Some((message, exit_code)) => Err(TagVersionError::TagSource {
                message: message.clone(),
                exit_code: *exit_code,
            }),
            None => Ok(self.tags.clone()),
        }
    }
}
