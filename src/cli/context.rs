//! Shared command context for CLI commands
//!
//! Builds the tracker services once per run from resolved options.

use roadmap_sync::error::Result;
use roadmap_sync::platform::{GitHubService, LinearService};
use roadmap_sync::types::SyncOptions;

/// Shared context for a roadmap run
///
/// The GitHub client is created lazily on first use and lives as long as
/// this context, so the fetches and any issue creation share it.
pub struct CommandContext {
    /// Resolved options for this run
    pub options: SyncOptions,
    /// Linear ticket source
    pub linear: LinearService,
    /// GitHub issue tracker
    pub github: GitHubService,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(options: SyncOptions) -> Result<Self> {
        let linear = LinearService::new(&options.linear_api_key)?;
        let github = GitHubService::new(options.github_repo.clone());

        Ok(Self {
            options,
            linear,
            github,
        })
    }
}
