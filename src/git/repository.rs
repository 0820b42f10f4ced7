use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use git2::{Oid, Reference, Repository, Sort};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::TagSelector;
use crate::error::{Result, TagVersionError};
use crate::git::{sort_recent_first, RawTag, TagSource};

/// Tag source backed by libgit2.
///
/// Each tag is peeled to its commit: the timestamp is the commit's author
/// time and the commit id is the peeled commit, also for annotated tags.
pub struct Git2TagSource {
    path: PathBuf,
}

impl Git2TagSource {
    /// Discover the repository containing `path` when fetching
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Git2TagSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TagSource for Git2TagSource {
    async fn fetch(&self, selector: &TagSelector) -> Result<Vec<RawTag>> {
        let path = self.path.clone();
        let selector = selector.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<RawTag>> {
            let repo = Repository::discover(&path)?;
            match &selector {
                TagSelector::ExplicitRef(reference) => {
                    let glob = if reference.starts_with("refs") {
                        reference.clone()
                    } else {
                        format!("refs/tags/{}", reference)
                    };
                    list_refs(&repo, &glob)
                }
                TagSelector::PerBranch => list_reachable(&repo),
                TagSelector::AllTags => list_refs(&repo, "refs/tags/*"),
            }
        })
        .await
        .map_err(|e| TagVersionError::tag_source(format!("tag listing task failed: {}", e)))?
    }
}

fn to_utc(time: git2::Time) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(time.seconds(), 0).single()
}

fn raw_tag(name: &str, reference: &Reference<'_>) -> RawTag {
    match reference.peel_to_commit() {
        Ok(commit) => RawTag {
            name: name.to_string(),
            timestamp: to_utc(commit.author().when()),
            commit: Some(commit.id().to_string()),
            synthetic: false,
        },
        // Tags on trees or blobs have no commit date.
        Err(_) => RawTag {
            name: name.to_string(),
            timestamp: None,
            commit: reference.target().map(|oid| oid.to_string()),
            synthetic: false,
        },
    }
}

/// Every reference matching `glob`, most recent first
fn list_refs(repo: &Repository, glob: &str) -> Result<Vec<RawTag>> {
    let mut tags = Vec::new();

    for reference in repo.references_glob(glob)? {
        let reference = reference?;
        let Some(name) = reference.shorthand() else {
            continue;
        };
        tags.push(raw_tag(name, &reference));
    }

    sort_recent_first(&mut tags);
    tracing::debug!(glob, count = tags.len(), "listed tags");
    Ok(tags)
}

/// Tags on commits reachable from HEAD, in revision-walk order
fn list_reachable(repo: &Repository) -> Result<Vec<RawTag>> {
    let mut by_commit: HashMap<Oid, Vec<String>> = HashMap::new();
    for reference in repo.references_glob("refs/tags/*")? {
        let reference = reference?;
        let (Some(name), Ok(commit)) = (reference.shorthand(), reference.peel_to_commit()) else {
            continue;
        };
        by_commit
            .entry(commit.id())
            .or_default()
            .push(name.to_string());
    }

    let mut walk = repo.revwalk()?;
    walk.set_sorting(Sort::TIME)?;
    walk.push_head()?;

    let mut tags = Vec::new();
    for oid in walk {
        let oid = oid?;
        let Some(names) = by_commit.get_mut(&oid) else {
            continue;
        };
        names.sort();

        let commit = repo.find_commit(oid)?;
        let timestamp = to_utc(commit.author().when());
        for name in names.iter() {
            tags.push(RawTag {
                name: name.clone(),
                timestamp,
                commit: Some(oid.to_string()),
                synthetic: false,
            });
        }
    }

    tracing::debug!(count = tags.len(), "listed tags reachable from HEAD");
    Ok(tags)
}
