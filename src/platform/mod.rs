//! Tracker services for Linear and GitHub
//!
//! The reconciliation engine only sees these traits, so tests can swap in
//! in-memory trackers.

mod github;
mod linear;

pub use github::GitHubService;
pub use linear::{LINEAR_API_URL, LinearService, LinearTeam};

use crate::error::Result;
use crate::types::{Issue, PullRequest, RepoRef, Ticket};
use async_trait::async_trait;

/// Source of Linear tickets
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Fetch every ticket of `team` carrying all of `tags`
    ///
    /// Fails if the team cannot be resolved or the API rejects the key.
    async fn fetch_tickets(&self, team: &str, tags: &[String]) -> Result<Vec<Ticket>>;
}

/// GitHub issue and pull request operations
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch every issue (any state) carrying all of `labels`
    async fn fetch_issues(&self, labels: &[String]) -> Result<Vec<Issue>>;

    /// Fetch every pull request (any state)
    ///
    /// `labels` is accepted for symmetry with [`fetch_issues`] but does not
    /// filter the result; PRs are narrowed by state later.
    ///
    /// [`fetch_issues`]: Self::fetch_issues
    async fn fetch_pull_requests(&self, labels: &[String]) -> Result<Vec<PullRequest>>;

    /// Create an issue and return it
    async fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> Result<Issue>;

    /// The repository this tracker operates on
    fn repo(&self) -> &RepoRef;
}
