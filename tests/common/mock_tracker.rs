//! In-memory issue tracker and progress recorder for engine tests

#![allow(dead_code)]

use async_trait::async_trait;
use roadmap_sync::error::{Error, Result};
use roadmap_sync::platform::IssueTracker;
use roadmap_sync::progress::ProgressCallback;
use roadmap_sync::types::{Issue, IssueState, PullRequest, RepoRef};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_issue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueCall {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// Mock GitHub tracker
///
/// Features:
/// - Auto-incrementing issue numbers, starting after the seeded issues
/// - Call tracking for verification
/// - Per-title error injection for failure path testing
pub struct MockIssueTracker {
    repo: RepoRef,
    next_number: AtomicU64,
    issues: Mutex<Vec<Issue>>,
    pulls: Mutex<Vec<PullRequest>>,
    create_issue_calls: Mutex<Vec<CreateIssueCall>>,
    fetch_calls: AtomicU64,
    create_errors: Mutex<HashMap<String, String>>,
}

impl MockIssueTracker {
    pub fn new() -> Self {
        Self {
            repo: RepoRef::new("acme", "app"),
            next_number: AtomicU64::new(100),
            issues: Mutex::new(Vec::new()),
            pulls: Mutex::new(Vec::new()),
            create_issue_calls: Mutex::new(Vec::new()),
            fetch_calls: AtomicU64::new(0),
            create_errors: Mutex::new(HashMap::new()),
        }
    }

    /// Seed the issues returned by `fetch_issues`
    pub fn set_issues(&self, issues: Vec<Issue>) {
        *self.issues.lock().unwrap() = issues;
    }

    /// Seed the pull requests returned by `fetch_pull_requests`
    pub fn set_pulls(&self, pulls: Vec<PullRequest>) {
        *self.pulls.lock().unwrap() = pulls;
    }

    /// Make `create_issue` fail for this title
    pub fn fail_create_for(&self, title: &str, message: &str) {
        self.create_errors
            .lock()
            .unwrap()
            .insert(title.to_string(), message.to_string());
    }

    pub fn create_issue_calls(&self) -> Vec<CreateIssueCall> {
        self.create_issue_calls.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn assert_no_creates(&self) {
        let calls = self.create_issue_calls();
        assert!(
            calls.is_empty(),
            "expected no create_issue calls, got {calls:?}"
        );
    }
}

impl Default for MockIssueTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssueTracker for MockIssueTracker {
    async fn fetch_issues(&self, labels: &[String]) -> Result<Vec<Issue>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let issues = self.issues.lock().unwrap().clone();
        Ok(issues
            .into_iter()
            .filter(|issue| roadmap_sync::reconcile::matches_all(&issue.labels, labels))
            .collect())
    }

    async fn fetch_pull_requests(&self, _labels: &[String]) -> Result<Vec<PullRequest>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pulls.lock().unwrap().clone())
    }

    async fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> Result<Issue> {
        self.create_issue_calls.lock().unwrap().push(CreateIssueCall {
            title: title.to_string(),
            body: body.to_string(),
            labels: labels.to_vec(),
        });

        if let Some(message) = self.create_errors.lock().unwrap().get(title) {
            return Err(Error::GitHubApi(message.clone()));
        }

        let number = self.next_number.fetch_add(1, Ordering::SeqCst);
        Ok(Issue {
            id: number * 1000,
            number,
            title: title.to_string(),
            url: format!("https://github.com/acme/app/issues/{number}"),
            state: IssueState::Open,
            labels: labels.to_vec(),
        })
    }

    fn repo(&self) -> &RepoRef {
        &self.repo
    }
}

/// Progress callback that keeps every line
#[derive(Default)]
pub struct RecordingProgress {
    messages: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    async fn on_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
