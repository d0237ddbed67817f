//! GitHub tracker implementation

use crate::auth::get_github_auth;
use crate::error::{Error, Result};
use crate::platform::IssueTracker;
use crate::reconcile::matches_all;
use crate::types::{Issue, IssueState, PullRequest, RepoRef};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::models::IssueState as OctoIssueState;
use octocrab::models::Label;
use octocrab::params::State;
use tokio::sync::OnceCell;
use tracing::debug;

/// Page size for list requests (GitHub maximum)
const PER_PAGE: u8 = 100;

/// GitHub service using octocrab
///
/// The client is built on first use. Concurrent first callers share one
/// initialization, and a failed initialization is retried by the next
/// caller rather than remembered.
pub struct GitHubService {
    repo: RepoRef,
    token: Option<String>,
    base_uri: Option<String>,
    client: OnceCell<Octocrab>,
}

impl GitHubService {
    /// Create a service for `repo`, discovering the token on first use
    pub fn new(repo: RepoRef) -> Self {
        Self {
            repo,
            token: None,
            base_uri: None,
            client: OnceCell::new(),
        }
    }

    /// Use this token instead of discovering one
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Talk to a different API root (GitHub Enterprise, test servers)
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    async fn client(&self) -> Result<&Octocrab> {
        self.client
            .get_or_try_init(|| async {
                let token = match &self.token {
                    Some(token) => token.clone(),
                    None => {
                        let auth = get_github_auth().await?;
                        debug!(source = ?auth.source, "resolved GitHub token");
                        auth.token
                    }
                };

                let mut builder = Octocrab::builder().personal_token(token);
                if let Some(ref base_uri) = self.base_uri {
                    builder = builder
                        .base_uri(base_uri)
                        .map_err(|e| Error::GitHubApi(e.to_string()))?;
                }

                debug!(repo = %self.repo, "built GitHub client");
                builder.build().map_err(|e| Error::GitHubApi(e.to_string()))
            })
            .await
    }
}

fn label_names(labels: &[Label]) -> Vec<String> {
    labels
        .iter()
        .map(|l| l.name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn issue_state(state: Option<&OctoIssueState>) -> IssueState {
    match state {
        Some(OctoIssueState::Open) => IssueState::Open,
        // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
        Some(_) | None => IssueState::Closed,
    }
}

/// Helper to convert an octocrab issue to our `Issue` type
fn issue_from_octocrab(issue: &octocrab::models::issues::Issue) -> Issue {
    Issue {
        id: issue.id.0,
        number: issue.number,
        title: issue.title.clone(),
        url: issue.html_url.to_string(),
        state: issue_state(Some(&issue.state)),
        labels: label_names(&issue.labels),
    }
}

/// Helper to convert an octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        issue: Issue {
            id: pr.id.0,
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            state: issue_state(pr.state.as_ref()),
            labels: pr.labels.as_deref().map(label_names).unwrap_or_default(),
        },
        draft: Some(pr.draft.unwrap_or(false)),
        merged: Some(pr.merged_at.is_some()),
    }
}

#[async_trait]
impl IssueTracker for GitHubService {
    async fn fetch_issues(&self, labels: &[String]) -> Result<Vec<Issue>> {
        debug!(repo = %self.repo, ?labels, "fetching issues");
        let client = self.client().await?;
        let handler = client.issues(&self.repo.owner, &self.repo.name);

        let mut request = handler.list().state(State::All).per_page(PER_PAGE);
        if !labels.is_empty() {
            request = request.labels(labels);
        }
        let first_page = request.send().await?;
        let all = client.all_pages(first_page).await?;

        // The issues endpoint also returns PRs; drop them and re-check labels
        let issues: Vec<Issue> = all
            .iter()
            .filter(|issue| issue.pull_request.is_none())
            .map(issue_from_octocrab)
            .filter(|issue| matches_all(&issue.labels, labels))
            .collect();

        debug!(count = issues.len(), "fetched issues");
        Ok(issues)
    }

    async fn fetch_pull_requests(&self, _labels: &[String]) -> Result<Vec<PullRequest>> {
        debug!(repo = %self.repo, "fetching pull requests");
        let client = self.client().await?;

        let first_page = client
            .pulls(&self.repo.owner, &self.repo.name)
            .list()
            .state(State::All)
            .per_page(PER_PAGE)
            .send()
            .await?;
        let all = client.all_pages(first_page).await?;

        let pulls: Vec<PullRequest> = all.iter().map(pr_from_octocrab).collect();
        debug!(count = pulls.len(), "fetched pull requests");
        Ok(pulls)
    }

    async fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> Result<Issue> {
        debug!(repo = %self.repo, title, "creating issue");
        let client = self.client().await?;
        let handler = client.issues(&self.repo.owner, &self.repo.name);

        let mut builder = handler.create(title).body(body);
        if !labels.is_empty() {
            builder = builder.labels(labels.to_vec());
        }
        let created = builder.send().await?;

        let issue = issue_from_octocrab(&created);
        debug!(number = issue.number, "created issue");
        Ok(issue)
    }

    fn repo(&self) -> &RepoRef {
        &self.repo
    }
}
