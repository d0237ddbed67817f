//! Roadmap planning - pure functions for linking and ordering
//!
//! Nothing here performs I/O. The fetched collections (plus any issues
//! created earlier in the run) go in, the ordered roadmap comes out, so
//! the same inputs always yield the same items in the same order.

use crate::reconcile::links::is_github_issue_url;
use crate::reconcile::priority::compare_priority;
use crate::reconcile::pulls::filter_pulls;
use crate::types::{
    Issue, MergedRoadmapItem, PrStateFilter, PullRequest, RoadmapContext, SyncOptions, Ticket,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Collections gathered from both trackers before reconciliation
#[derive(Debug, Clone, Default)]
pub struct RoadmapData {
    /// Linear tickets (tag filter already applied)
    pub tickets: Vec<Ticket>,
    /// GitHub issues (label filter already applied)
    pub issues: Vec<Issue>,
    /// GitHub pull requests, every state
    pub pulls: Vec<PullRequest>,
}

/// Body and labels for an issue to be created from a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
    /// Identifier of the source ticket (for diagnostics)
    pub identifier: String,
    /// Web URL of the source ticket
    pub ticket_url: Option<String>,
    /// Issue title (the ticket's)
    pub title: String,
    /// Issue body pointing back at the ticket
    pub body: String,
    /// Labels to apply
    pub labels: Vec<String>,
}

/// Reconciled roadmap - the functional core output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapPlan {
    /// Tickets that are still active
    pub linear_tickets: Vec<Ticket>,
    /// Issues exactly as fetched (created issues are not included)
    pub github_issues: Vec<Issue>,
    /// PRs passing the state filter
    pub github_pulls: Vec<PullRequest>,
    /// Linked, prioritized items
    pub merged_items: Vec<MergedRoadmapItem>,
}

impl RoadmapPlan {
    /// Assemble the template context for this plan
    pub fn into_context(self, options: SyncOptions, generated_at: DateTime<Utc>) -> RoadmapContext {
        RoadmapContext {
            generated_at,
            linear_tickets: self.linear_tickets,
            github_issues: self.github_issues,
            github_pulls: self.github_pulls,
            merged_items: self.merged_items,
            options,
        }
    }
}

/// Drop tickets whose work is completed or canceled
///
/// Tickets without a workflow state are kept.
pub fn active_tickets(tickets: &[Ticket]) -> Vec<Ticket> {
    tickets
        .iter()
        .filter(|t| !t.workflow_state.is_some_and(|s| s.is_closed()))
        .cloned()
        .collect()
}

/// First attachment that is a canonical GitHub issue link
pub fn github_issue_link(ticket: &Ticket) -> Option<&str> {
    ticket
        .attachments
        .iter()
        .map(|a| a.url.as_str())
        .find(|url| is_github_issue_url(url))
}

/// Tickets with no GitHub issue link at all
pub fn tickets_needing_issues(tickets: &[Ticket]) -> Vec<&Ticket> {
    tickets
        .iter()
        .filter(|t| github_issue_link(t).is_none())
        .collect()
}

/// Build the create-issue request for an unlinked ticket
pub fn issue_request_for(ticket: &Ticket, labels: &[String]) -> IssueRequest {
    let priority = ticket
        .priority
        .map_or_else(|| "None".to_string(), |p| p.to_string());
    let body = format!(
        "Linear ticket: {}\n\nState: {}\nPriority: {priority}",
        ticket.url.as_deref().unwrap_or_default(),
        ticket.state.as_deref().unwrap_or("Unknown"),
    );

    IssueRequest {
        identifier: ticket.identifier.clone(),
        ticket_url: ticket.url.clone(),
        title: ticket.title.clone(),
        body,
        labels: labels.to_vec(),
    }
}

/// Link tickets to issues and append unlinked issues
///
/// Each issue is consumed by at most one ticket: the first ticket whose
/// GitHub link resolves to it. Issues nobody links to follow all
/// ticket-derived items in their original order. The result is not yet
/// sorted.
pub fn link_items(tickets: &[Ticket], issues: &[Issue]) -> Vec<MergedRoadmapItem> {
    let mut consumed: HashSet<&str> = HashSet::new();
    let mut items = Vec::with_capacity(tickets.len() + issues.len());

    for ticket in tickets {
        let linked = github_issue_link(ticket).and_then(|url| {
            issues
                .iter()
                .find(|issue| issue.url == url && !consumed.contains(issue.url.as_str()))
        });

        if let Some(issue) = linked {
            consumed.insert(issue.url.as_str());
            items.push(MergedRoadmapItem::linked(ticket.clone(), issue.clone()));
        } else {
            items.push(MergedRoadmapItem::ticket_only(ticket.clone()));
        }
    }

    items.extend(
        issues
            .iter()
            .filter(|issue| !consumed.contains(issue.url.as_str()))
            .cloned()
            .map(MergedRoadmapItem::issue_only),
    );

    items
}

/// Stable sort by ticket priority
pub fn sort_by_priority(items: &mut [MergedRoadmapItem]) {
    // sort_by is stable, which keeps unprioritized items in arrival order
    items.sort_by(|a, b| compare_priority(a.priority(), b.priority()));
}

/// Create a roadmap plan (PURE - no I/O, easily testable)
///
/// # Arguments
/// * `data` - Collections fetched from both trackers
/// * `created_issues` - Issues created during this run, appended to the
///   fetched issues for linking
/// * `pr_state` - Which pull requests to keep
pub fn create_roadmap_plan(
    data: &RoadmapData,
    created_issues: &[Issue],
    pr_state: PrStateFilter,
) -> RoadmapPlan {
    let linear_tickets = active_tickets(&data.tickets);
    let github_pulls = filter_pulls(&data.pulls, pr_state);

    let working_issues: Vec<Issue> = data
        .issues
        .iter()
        .chain(created_issues)
        .cloned()
        .collect();

    let mut merged_items = link_items(&linear_tickets, &working_issues);
    sort_by_priority(&mut merged_items);

    RoadmapPlan {
        linear_tickets,
        github_issues: data.issues.clone(),
        github_pulls,
        merged_items,
    }
}
