//! Command-line interface

pub mod context;
pub mod style;
pub mod sync;

use anstream::{eprintln, println};
use async_trait::async_trait;
use clap::{ArgAction, Parser};
use roadmap_sync::config::RawOptions;
use roadmap_sync::progress::ProgressCallback;
use std::path::PathBuf;
use style::Stylize;

/// Generate a roadmap markdown file from Linear issues and GitHub artifacts.
#[derive(Debug, Parser)]
#[command(name = "roadmap-sync", version)]
pub struct Cli {
    /// Linear team id, key, or name to pull issues from
    #[arg(short = 't', long, value_name = "TEAM")]
    pub linear_team: Option<String>,

    /// Linear API key (falls back to LINEAR_API_KEY env variable)
    #[arg(short = 'k', long, value_name = "KEY")]
    pub linear_api_key: Option<String>,

    /// Filter Linear issues by tag (can be used multiple times)
    #[arg(short = 'T', long = "linear-tag", value_name = "TAG")]
    pub linear_tags: Vec<String>,

    /// GitHub repository in the form owner/name
    #[arg(short = 'r', long, value_name = "REPO")]
    pub github_repo: Option<String>,

    /// Filter GitHub issues by label (can be used multiple times)
    #[arg(short = 'g', long = "github-tag", value_name = "TAG")]
    pub github_tags: Vec<String>,

    /// Filter GitHub PRs by state: all, open, closed, merged [default: open]
    #[arg(long, value_name = "STATE")]
    pub github_pr_state: Option<String>,

    /// Destination markdown file [default: ROADMAP.md]
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Template file overriding the built-in roadmap template
    #[arg(short = 'p', long, value_name = "FILE")]
    pub template_file: Option<PathBuf>,

    /// Create GitHub issues for Linear tickets without linked issues
    #[arg(long)]
    pub create_github_issues: bool,

    /// Print the generated roadmap instead of writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Config file (defaults to the user config dir)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Flags as unvalidated options
    pub fn raw_options(&self) -> RawOptions {
        RawOptions {
            linear_team: self.linear_team.clone(),
            linear_api_key: self.linear_api_key.clone(),
            linear_tags: self.linear_tags.clone(),
            github_repo: self.github_repo.clone(),
            github_tags: self.github_tags.clone(),
            github_pr_state: self.github_pr_state.clone(),
            output_file: self.output_file.clone(),
            template_file: self.template_file.clone(),
            dry_run: self.dry_run,
            create_github_issues: self.create_github_issues,
        }
    }
}

/// Prints progress to stdout and failures to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProgress;

impl CliProgress {
    /// Create a progress printer
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("{message}");
    }

    async fn on_error(&self, message: &str) {
        eprintln!("{}", message.warn());
    }
}
