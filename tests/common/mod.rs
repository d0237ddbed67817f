//! Shared test fixtures

#![allow(dead_code)]

mod mock_tracker;

pub use mock_tracker::{CreateIssueCall, MockIssueTracker, RecordingProgress};

use roadmap_sync::types::{
    Attachment, Issue, IssueState, PrStateFilter, PullRequest, RepoRef, SyncOptions, Ticket,
    WorkflowState,
};
use std::path::PathBuf;

/// Ticket with a URL, a workflow state and an optional priority
pub fn make_ticket(identifier: &str, state: WorkflowState, priority: Option<i64>) -> Ticket {
    let mut ticket = Ticket::new(
        format!("id-{identifier}"),
        identifier,
        format!("Ticket {identifier}"),
    );
    ticket.url = Some(format!("https://linear.app/acme/issue/{identifier}"));
    ticket.state = Some(format!("{state:?}"));
    ticket.workflow_state = Some(state);
    ticket.priority = priority;
    ticket
}

/// Started ticket whose attachment links to issue `number`
pub fn ticket_linking(identifier: &str, number: u64) -> Ticket {
    let mut ticket = make_ticket(identifier, WorkflowState::Started, None);
    ticket.attachments.push(Attachment::new(issue_url(number)));
    ticket
}

pub fn issue_url(number: u64) -> String {
    format!("https://github.com/acme/app/issues/{number}")
}

pub fn make_issue(number: u64) -> Issue {
    Issue {
        id: number * 1000,
        number,
        title: format!("Issue {number}"),
        url: issue_url(number),
        state: IssueState::Open,
        labels: vec![],
    }
}

pub fn make_pr(number: u64, state: IssueState, merged: bool) -> PullRequest {
    PullRequest {
        issue: Issue {
            id: number * 1000,
            number,
            title: format!("PR {number}"),
            url: format!("https://github.com/acme/app/pull/{number}"),
            state,
            labels: vec![],
        },
        draft: Some(false),
        merged: Some(merged),
    }
}

pub fn sync_options() -> SyncOptions {
    SyncOptions {
        linear_team: "ENG".to_string(),
        linear_api_key: "lin_api_test".to_string(),
        linear_tags: vec![],
        github_repo: RepoRef::new("acme", "app"),
        github_tags: vec![],
        github_pr_state: PrStateFilter::Open,
        output_file: PathBuf::from("ROADMAP.md"),
        template_file: None,
        dry_run: false,
        create_github_issues: false,
    }
}
