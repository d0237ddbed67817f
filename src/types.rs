//! Core types for roadmap-sync

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;
use std::str::FromStr;

/// Lifecycle category of a Linear ticket
///
/// Distinct from the free-text display state (`Ticket::state`), which is
/// whatever the team named the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowState {
    /// Not yet triaged into the plan
    Backlog,
    /// Planned but not picked up
    Unstarted,
    /// In progress
    Started,
    /// Done
    Completed,
    /// Abandoned
    Canceled,
    /// Awaiting triage
    Triage,
}

impl WorkflowState {
    /// Parse the `type` field Linear reports for a workflow state.
    ///
    /// Unknown types yield `None` rather than an error.
    pub fn from_linear_type(value: &str) -> Option<Self> {
        match value {
            "backlog" => Some(Self::Backlog),
            "unstarted" => Some(Self::Unstarted),
            "started" => Some(Self::Started),
            "completed" => Some(Self::Completed),
            "canceled" => Some(Self::Canceled),
            "triage" => Some(Self::Triage),
            _ => None,
        }
    }

    /// Whether work in this state is finished (done or abandoned)
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }
}

/// A link attached to a Linear ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Target URL
    pub url: String,
    /// Attachment title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Attachment subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl Attachment {
    /// Attachment with only a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            subtitle: None,
        }
    }
}

/// A work item from Linear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Opaque Linear ID
    pub id: String,
    /// Human-facing identifier (e.g. "TEAM-123")
    pub identifier: String,
    /// Ticket title
    pub title: String,
    /// Web URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Display name of the current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Lifecycle category of the current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_state: Option<WorkflowState>,
    /// Priority rank: 1 is most urgent, 0 or absent means no priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Label names
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attached links
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Ticket {
    /// Create a ticket with only identity and title set
    pub fn new(
        id: impl Into<String>,
        identifier: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            identifier: identifier.into(),
            title: title.into(),
            url: None,
            state: None,
            workflow_state: None,
            priority: None,
            tags: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

/// GitHub issue state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Open
    Open,
    /// Closed
    Closed,
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A GitHub issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Global numeric ID
    pub id: u64,
    /// Repository-scoped number
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Canonical web URL
    pub url: String,
    /// Open or closed
    pub state: IssueState,
    /// Label names
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A GitHub pull request
///
/// Serializes flat, so templates see `number`, `url` etc. directly
/// alongside `draft` and `merged`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Issue-shaped fields shared with issues
    #[serde(flatten)]
    pub issue: Issue,
    /// Whether the PR is a draft
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// True iff the PR has a merge timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged: Option<bool>,
}

impl PullRequest {
    /// Whether the PR was merged
    pub fn is_merged(&self) -> bool {
        self.merged == Some(true)
    }
}

/// Which pull requests end up in the roadmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStateFilter {
    /// Every PR
    All,
    /// Open and not merged
    #[default]
    Open,
    /// Closed without merging
    Closed,
    /// Merged
    Merged,
}

impl PrStateFilter {
    /// Accepted textual values, in display order
    pub const VALUES: [&'static str; 4] = ["all", "open", "closed", "merged"];
}

impl FromStr for PrStateFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Self::All),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "merged" => Ok(Self::Merged),
            other => Err(Error::Config(format!(
                "Invalid --github-pr-state value: {other}. Must be one of: {}",
                Self::VALUES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for PrStateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// A GitHub repository reference (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Create a repository reference
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepoRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split('/')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        match parts.as_slice() {
            [owner, name] => Ok(Self {
                owner: (*owner).to_string(),
                name: (*name).to_string(),
            }),
            _ => Err(Error::Config(format!(
                "GitHub repository must be provided as \"owner/name\", received \"{s}\""
            ))),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Serialize for RepoRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One line of the roadmap: a ticket, an issue, or a linked pair
///
/// Serializes untagged with the field names templates expect
/// (`linearTicket`, `githubIssue`, `title`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MergedRoadmapItem {
    /// Ticket with its linked GitHub issue
    #[serde(rename_all = "camelCase")]
    Linked {
        /// The Linear ticket
        linear_ticket: Ticket,
        /// The GitHub issue it links to
        github_issue: Issue,
        /// Display title (the ticket's)
        title: String,
    },
    /// Ticket without a matching GitHub issue
    #[serde(rename_all = "camelCase")]
    TicketOnly {
        /// The Linear ticket
        linear_ticket: Ticket,
        /// Display title (the ticket's)
        title: String,
    },
    /// GitHub issue not referenced by any ticket
    #[serde(rename_all = "camelCase")]
    IssueOnly {
        /// The GitHub issue
        github_issue: Issue,
        /// Display title (the issue's)
        title: String,
    },
}

impl MergedRoadmapItem {
    /// Pair a ticket with its issue; the ticket supplies the title
    pub fn linked(ticket: Ticket, issue: Issue) -> Self {
        let title = ticket.title.clone();
        Self::Linked {
            linear_ticket: ticket,
            github_issue: issue,
            title,
        }
    }

    /// Ticket with no linked issue
    pub fn ticket_only(ticket: Ticket) -> Self {
        let title = ticket.title.clone();
        Self::TicketOnly {
            linear_ticket: ticket,
            title,
        }
    }

    /// Issue with no ticket
    pub fn issue_only(issue: Issue) -> Self {
        let title = issue.title.clone();
        Self::IssueOnly {
            github_issue: issue,
            title,
        }
    }

    /// The Linear side, if any
    pub const fn ticket(&self) -> Option<&Ticket> {
        match self {
            Self::Linked { linear_ticket, .. } | Self::TicketOnly { linear_ticket, .. } => {
                Some(linear_ticket)
            }
            Self::IssueOnly { .. } => None,
        }
    }

    /// The GitHub side, if any
    pub const fn issue(&self) -> Option<&Issue> {
        match self {
            Self::Linked { github_issue, .. } | Self::IssueOnly { github_issue, .. } => {
                Some(github_issue)
            }
            Self::TicketOnly { .. } => None,
        }
    }

    /// Display title
    pub fn title(&self) -> &str {
        match self {
            Self::Linked { title, .. }
            | Self::TicketOnly { title, .. }
            | Self::IssueOnly { title, .. } => title,
        }
    }

    /// Priority of the ticket side (issue-only items have none)
    pub fn priority(&self) -> Option<i64> {
        self.ticket().and_then(|t| t.priority)
    }
}

/// Resolved configuration for one run
///
/// Built once at the boundary by [`crate::config::resolve_options`] and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOptions {
    /// Linear team id, key, or name
    pub linear_team: String,
    /// Linear API key (never rendered)
    #[serde(skip_serializing)]
    pub linear_api_key: String,
    /// Required Linear labels
    pub linear_tags: Vec<String>,
    /// Target GitHub repository
    pub github_repo: RepoRef,
    /// Required GitHub labels (also applied to created issues)
    pub github_tags: Vec<String>,
    /// Which PRs to include
    pub github_pr_state: PrStateFilter,
    /// Destination file
    pub output_file: PathBuf,
    /// Template override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_file: Option<PathBuf>,
    /// Print instead of writing, and never mutate GitHub
    pub dry_run: bool,
    /// Create GitHub issues for unlinked tickets
    pub create_github_issues: bool,
}

/// Everything the template sees
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapContext {
    /// When the roadmap was generated
    #[serde(serialize_with = "serialize_timestamp")]
    pub generated_at: DateTime<Utc>,
    /// Active Linear tickets
    pub linear_tickets: Vec<Ticket>,
    /// GitHub issues as fetched
    pub github_issues: Vec<Issue>,
    /// Pull requests that passed the state filter
    pub github_pulls: Vec<PullRequest>,
    /// Linked, prioritized roadmap items
    pub merged_items: Vec<MergedRoadmapItem>,
    /// Options for this run
    pub options: SyncOptions,
}

fn serialize_timestamp<S: Serializer>(
    at: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_parses_owner_and_name() {
        let repo: RepoRef = " acme / widgets ".parse().unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "widgets");
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn test_repo_ref_rejects_malformed() {
        for bad in ["acme", "acme/widgets/extra", "/", ""] {
            let err = bad.parse::<RepoRef>().unwrap_err();
            assert!(
                err.to_string().contains("owner/name"),
                "unexpected error for {bad:?}: {err}"
            );
        }
    }

    #[test]
    fn test_pr_state_filter_parse() {
        assert_eq!("merged".parse::<PrStateFilter>().unwrap(), PrStateFilter::Merged);
        let err = "draft".parse::<PrStateFilter>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid --github-pr-state value: draft. Must be one of: all, open, closed, merged"
        );
    }

    #[test]
    fn test_merged_item_serializes_template_fields() {
        let ticket = Ticket::new("t1", "ENG-1", "Ship it");
        let item = MergedRoadmapItem::ticket_only(ticket);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["title"], "Ship it");
        assert_eq!(value["linearTicket"]["identifier"], "ENG-1");
        assert!(value.get("githubIssue").is_none());
    }

    #[test]
    fn test_workflow_state_unknown_type() {
        assert_eq!(WorkflowState::from_linear_type("started"), Some(WorkflowState::Started));
        assert_eq!(WorkflowState::from_linear_type("paused"), None);
    }
}
