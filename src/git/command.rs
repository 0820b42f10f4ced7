use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::config::TagSelector;
use crate::error::{Result, TagVersionError};
use crate::git::{RawTag, TagSource};

/// Field separator used in the `--format`/`--pretty` strings below.
const SEPARATOR: &str = "|||";

const REF_FORMAT: &str = "--format=%(refname:short)|||%(authordate:iso-strict)|||%(objectname)";

/// Tag source that runs the `git` binary.
///
/// Listings are sorted by author date, newest first, as git reports them.
/// Annotated tags have no author date of their own and are therefore
/// reported without a timestamp. A failing `git` invocation keeps its exit
/// status in the returned error.
pub struct GitCliTagSource {
    repo_dir: PathBuf,
}

impl GitCliTagSource {
    pub fn new<P: AsRef<Path>>(repo_dir: P) -> Self {
        GitCliTagSource {
            repo_dir: repo_dir.as_ref().to_path_buf(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .await
            .map_err(|e| TagVersionError::tag_source(format!("cannot run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TagVersionError::TagSource {
                message: stderr.trim().to_string(),
                exit_code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl TagSource for GitCliTagSource {
    async fn fetch(&self, selector: &TagSelector) -> Result<Vec<RawTag>> {
        match selector {
            TagSelector::ExplicitRef(reference) if reference.starts_with("refs") => {
                let stdout = self
                    .run(&["for-each-ref", "--sort=-authordate", REF_FORMAT, reference.as_str()])
                    .await?;
                Ok(parse_ref_listing(&stdout))
            }
            TagSelector::ExplicitRef(reference) => {
                let stdout = self
                    .run(&["tag", "--sort=-authordate", REF_FORMAT, "--list", reference.as_str()])
                    .await?;
                Ok(parse_ref_listing(&stdout))
            }
            TagSelector::PerBranch => {
                let stdout = self
                    .run(&[
                        "rev-list",
                        "--no-commit-header",
                        "--pretty=%D|||%aI|||%H",
                        "HEAD",
                    ])
                    .await?;
                Ok(parse_decorated_history(&stdout))
            }
            TagSelector::AllTags => {
                let stdout = self
                    .run(&[
                        "for-each-ref",
                        "--sort=-authordate",
                        REF_FORMAT,
                        "refs/tags/*",
                    ])
                    .await?;
                Ok(parse_ref_listing(&stdout))
            }
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

fn parse_commit(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Parse `name|||date|||object` lines.
///
/// Missing or unparsable fields are kept as `None`; blank lines are dropped.
pub fn parse_ref_listing(stdout: &str) -> Vec<RawTag> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.splitn(3, SEPARATOR);
            let name = fields.next().unwrap_or_default().trim();
            let timestamp = fields.next().and_then(parse_timestamp);
            let commit = fields.next().and_then(parse_commit);
            RawTag {
                name: name.to_string(),
                timestamp,
                commit,
                synthetic: false,
            }
        })
        .collect()
}

/// Parse `decorations|||date|||hash` lines from a history walk.
///
/// Decorations look like `HEAD -> main, tag: v1.0.0, origin/main`; each
/// `tag: ` entry yields one record for that commit. Commits without tags
/// are dropped.
pub fn parse_decorated_history(stdout: &str) -> Vec<RawTag> {
    let mut tags = Vec::new();

    for line in stdout.lines() {
        let mut fields = line.splitn(3, SEPARATOR);
        let (Some(decorations), Some(date), Some(hash)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };

        let timestamp = parse_timestamp(date);
        let commit = parse_commit(hash);
        for decoration in decorations.split(", ") {
            if let Some(name) = decoration.trim().strip_prefix("tag: ") {
                tags.push(RawTag {
                    name: name.trim().to_string(),
                    timestamp,
                    commit: commit.clone(),
                    synthetic: false,
                });
            }
        }
    }

    tags
}
