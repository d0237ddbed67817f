//! Reconciliation engine for Linear tickets and GitHub issues
//!
//! Three-phase pattern:
//! 1. Gather - fetch tickets, issues, and PRs (effectful, in `platform`)
//! 2. Plan - link, merge, and order into a `RoadmapPlan` (pure, testable)
//! 3. Execute - create missing GitHub issues before planning (effectful)

mod execute;
mod labels;
mod links;
mod plan;
mod priority;
mod pulls;

pub use execute::{
    CreationFailure, IssueCreationReport, MAX_CONCURRENT_CREATES, ReconcileOutcome,
    create_issues, reconcile,
};
pub use labels::{matches_all, normalize_labels};
pub use links::is_github_issue_url;
pub use plan::{
    IssueRequest, RoadmapData, RoadmapPlan, active_tickets, create_roadmap_plan,
    github_issue_link, issue_request_for, link_items, sort_by_priority, tickets_needing_issues,
};
pub use priority::{compare_priority, effective_priority};
pub use pulls::filter_pulls;
