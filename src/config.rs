//! Configuration loading and validation
//!
//! Options come from three layers: command-line flags, the environment
//! (`LINEAR_API_KEY`), and an optional TOML file at
//! `<config dir>/linear-roadmap-sync/config.toml`:
//!
//! ```toml
//! linear_team = "ENG"
//! linear_tags = ["roadmap"]
//! github_repo = "acme/app"
//! github_tags = ["roadmap"]
//! github_pr_state = "open"
//! output_file = "ROADMAP.md"
//! ```
//!
//! Flags win over the environment, which wins over the file.

use crate::auth::get_linear_api_key;
use crate::error::{Error, Result};
use crate::types::{PrStateFilter, RepoRef, SyncOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name under the user config dir
const CONFIG_DIR: &str = "linear-roadmap-sync";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Output file used when none is configured
pub const DEFAULT_OUTPUT_FILE: &str = "ROADMAP.md";

/// Contents of the config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Linear team id, key, or name
    pub linear_team: Option<String>,
    /// Linear API key
    pub linear_api_key: Option<String>,
    /// Required Linear labels
    #[serde(default)]
    pub linear_tags: Vec<String>,
    /// GitHub repository (`owner/name`)
    pub github_repo: Option<String>,
    /// Required GitHub labels
    #[serde(default)]
    pub github_tags: Vec<String>,
    /// PR state filter
    pub github_pr_state: Option<String>,
    /// Output path
    pub output_file: Option<PathBuf>,
    /// Template path
    pub template_file: Option<PathBuf>,
}

/// Options as given on the command line, before validation
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    /// `--linear-team`
    pub linear_team: Option<String>,
    /// `--linear-api-key`
    pub linear_api_key: Option<String>,
    /// `--linear-tag` (repeatable)
    pub linear_tags: Vec<String>,
    /// `--github-repo`
    pub github_repo: Option<String>,
    /// `--github-tag` (repeatable)
    pub github_tags: Vec<String>,
    /// `--github-pr-state`
    pub github_pr_state: Option<String>,
    /// `--output-file`
    pub output_file: Option<PathBuf>,
    /// `--template-file`
    pub template_file: Option<PathBuf>,
    /// `--dry-run`
    pub dry_run: bool,
    /// `--create-github-issues`
    pub create_github_issues: bool,
}

/// Default config file location, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn parse_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Load the config file
///
/// An explicit path must exist. Without one, the default location is used
/// if present and an empty config is returned otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return parse_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading config");
            parse_config(&path)
        }
        _ => Ok(FileConfig::default()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Trim tag values and drop blank ones; case is kept for created labels
fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Flag tags replace file tags when any non-blank flag tag was given
fn pick_tags(flag: Vec<String>, file: Vec<String>) -> Vec<String> {
    let flag = clean_tags(flag);
    if flag.is_empty() {
        clean_tags(file)
    } else {
        flag
    }
}

/// Merge flags, environment, and file into validated [`SyncOptions`]
///
/// Every configuration error is reported here, before any network call.
pub fn resolve_options(raw: RawOptions, file: FileConfig) -> Result<SyncOptions> {
    let linear_team = non_empty(raw.linear_team)
        .or_else(|| non_empty(file.linear_team))
        .ok_or_else(|| Error::Config("Linear team identifier must not be empty.".to_string()))?
        .trim()
        .to_string();

    let github_repo: RepoRef = non_empty(raw.github_repo)
        .or_else(|| non_empty(file.github_repo))
        .ok_or_else(|| {
            Error::Config(
                "GitHub repository is required. Provide via --github-repo in the form owner/name."
                    .to_string(),
            )
        })?
        .parse()?;

    let github_pr_state = raw
        .github_pr_state
        .or(file.github_pr_state)
        .map_or(Ok(PrStateFilter::default()), |s| s.parse())?;

    let linear_auth =
        get_linear_api_key(raw.linear_api_key.as_deref(), file.linear_api_key.as_deref())?;
    debug!(source = ?linear_auth.source, "resolved Linear API key");

    let linear_tags = pick_tags(raw.linear_tags, file.linear_tags);
    let github_tags = pick_tags(raw.github_tags, file.github_tags);

    Ok(SyncOptions {
        linear_team,
        linear_api_key: linear_auth.api_key,
        linear_tags,
        github_repo,
        github_tags,
        github_pr_state,
        output_file: raw
            .output_file
            .or(file.output_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        template_file: raw.template_file.or(file.template_file),
        dry_run: raw.dry_run,
        create_github_issues: raw.create_github_issues,
    })
}
