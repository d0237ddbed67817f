//! Reconciliation execution - effectful operations
//!
//! Wraps the pure planner with the one side effect the engine has:
//! creating GitHub issues for tickets that have none. Every creation is
//! attempted independently and a failure only costs that ticket its link.

use crate::platform::IssueTracker;
use crate::progress::ProgressCallback;
use crate::reconcile::plan::{
    IssueRequest, RoadmapData, RoadmapPlan, active_tickets, create_roadmap_plan,
    issue_request_for, tickets_needing_issues,
};
use crate::types::{Issue, SyncOptions};
use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

/// Upper bound on concurrent create-issue calls
pub const MAX_CONCURRENT_CREATES: usize = 8;

/// An issue creation that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationFailure {
    /// Identifier of the ticket whose issue was not created
    pub identifier: String,
    /// Error message from the tracker
    pub message: String,
}

/// Outcome of the issue-creation pass
#[derive(Debug, Clone, Default)]
pub struct IssueCreationReport {
    /// Issues created, in ticket order
    pub created: Vec<Issue>,
    /// Tickets whose creation failed
    pub failures: Vec<CreationFailure>,
}

impl IssueCreationReport {
    /// Check if every attempted creation succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of a full reconciliation
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The reconciled roadmap
    pub plan: RoadmapPlan,
    /// What happened during issue creation (empty when it did not run)
    pub creation: IssueCreationReport,
}

async fn create_one(
    request: IssueRequest,
    tracker: &dyn IssueTracker,
    progress: &dyn ProgressCallback,
) -> Result<Issue, CreationFailure> {
    progress
        .on_message(&format!(
            "Creating GitHub issue for {}: {}",
            request.identifier, request.title
        ))
        .await;

    match tracker
        .create_issue(&request.title, &request.body, &request.labels)
        .await
    {
        Ok(issue) => {
            progress.on_message(&format!("  Created: {}", issue.url)).await;
            if let Some(ticket_url) = &request.ticket_url {
                progress
                    .on_message(&format!(
                        "  Note: Link this GitHub issue back to Linear ticket manually at {ticket_url}"
                    ))
                    .await;
            }
            Ok(issue)
        }
        Err(e) => {
            let message = e.to_string();
            warn!(identifier = %request.identifier, error = %message, "issue creation failed");
            progress
                .on_error(&format!(
                    "  Failed to create issue for {}: {message}",
                    request.identifier
                ))
                .await;
            Err(CreationFailure {
                identifier: request.identifier,
                message,
            })
        }
    }
}

/// Create GitHub issues for the given requests (EFFECTFUL)
///
/// Requests run concurrently, at most [`MAX_CONCURRENT_CREATES`] at a
/// time. Failures are collected, never propagated, and results keep the
/// order of `requests`.
pub async fn create_issues(
    requests: Vec<IssueRequest>,
    tracker: &dyn IssueTracker,
    progress: &dyn ProgressCallback,
) -> IssueCreationReport {
    debug!(count = requests.len(), "creating GitHub issues");

    let results: Vec<Result<Issue, CreationFailure>> = stream::iter(requests)
        .map(|request| create_one(request, tracker, progress))
        .buffered(MAX_CONCURRENT_CREATES)
        .collect()
        .await;

    let mut report = IssueCreationReport::default();
    for result in results {
        match result {
            Ok(issue) => report.created.push(issue),
            Err(failure) => report.failures.push(failure),
        }
    }

    debug!(
        created = report.created.len(),
        failed = report.failures.len(),
        "issue creation complete"
    );
    report
}

/// Reconcile fetched data into a roadmap (EFFECTFUL when creating issues)
///
/// Issue creation only runs with `create_github_issues` set and
/// `dry_run` unset; otherwise `tracker` is never called and this is the
/// pure [`create_roadmap_plan`].
pub async fn reconcile(
    data: &RoadmapData,
    options: &SyncOptions,
    tracker: &dyn IssueTracker,
    progress: &dyn ProgressCallback,
) -> ReconcileOutcome {
    let creation = if options.create_github_issues && !options.dry_run {
        let tickets = active_tickets(&data.tickets);
        let requests = tickets_needing_issues(&tickets)
            .into_iter()
            .map(|ticket| issue_request_for(ticket, &options.github_tags))
            .collect();
        create_issues(requests, tracker, progress).await
    } else {
        IssueCreationReport::default()
    };

    let plan = create_roadmap_plan(data, &creation.created, options.github_pr_state);
    debug!(items = plan.merged_items.len(), "reconciled roadmap");

    ReconcileOutcome { plan, creation }
}
