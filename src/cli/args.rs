use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(
    name = "git-tag-version",
    version,
    about = "Derive the current and next version from git tags"
)]
pub struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "INPUT_FALLBACK", help = "Version to use when no tags exist")]
    pub fallback: Option<String>,

    #[arg(long, env = "INPUT_PREFIX", help = "Tag prefix to match and to use for new tags")]
    pub prefix: Option<String>,

    #[arg(
        long = "prefix-regex",
        env = "INPUT_PREFIXREGEX",
        help = "Regex sub-pattern matching accepted prefixes"
    )]
    pub prefix_regex: Option<String>,

    #[arg(long, env = "INPUT_SUFFIX", help = "Tag suffix; enables suffix matching")]
    pub suffix: Option<String>,

    #[arg(
        long = "suffix-regex",
        env = "INPUT_SUFFIXREGEX",
        help = "Regex sub-pattern matching accepted suffixes"
    )]
    pub suffix_regex: Option<String>,

    #[arg(short, long, env = "INPUT_TAG", help = "Read the version from this tag or ref")]
    pub tag: Option<String>,

    #[arg(
        short,
        long,
        env = "INPUT_BRANCH",
        help = "Only consider tags reachable from HEAD (\"true\" to enable)"
    )]
    pub branch: Option<String>,

    #[arg(
        short,
        long,
        env = "INPUT_INCREMENT",
        help = "Auto-increment: major, minor, patch, build or suffix"
    )]
    pub increment: Option<String>,

    #[arg(
        long = "build-number",
        env = "INPUT_BUILD_NUMBER",
        help = "Static number for the build and suffix increments"
    )]
    pub build_number: Option<String>,

    #[arg(
        short,
        long,
        env = "GITHUB_OUTPUT",
        help = "File to append key=value outputs to (default: stderr)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Path inside the repository")]
    pub repo: PathBuf,

    #[arg(long, help = "List tags with the git binary instead of libgit2")]
    pub git_cli: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
}

impl Args {
    /// Option values given on the command line or through the environment
    pub fn settings(&self) -> Settings {
        Settings {
            fallback: self.fallback.clone(),
            prefix: self.prefix.clone(),
            prefix_regex: self.prefix_regex.clone(),
            suffix: self.suffix.clone(),
            suffix_regex: self.suffix_regex.clone(),
            tag: self.tag.clone(),
            branch: self.branch.clone(),
            increment: self.increment.clone(),
            build_number: self.build_number.clone(),
        }
    }
}
