//! Pull request state filtering
//!
//! The merge timestamp is authoritative: a merged PR is never "open" or
//! "closed" for filtering purposes, whatever its raw state says.

use crate::types::{IssueState, PrStateFilter, PullRequest};

impl PrStateFilter {
    /// Whether `pr` belongs in the roadmap under this filter
    pub fn matches(self, pr: &PullRequest) -> bool {
        match self {
            Self::All => true,
            Self::Open => pr.issue.state == IssueState::Open && !pr.is_merged(),
            Self::Closed => pr.issue.state == IssueState::Closed && !pr.is_merged(),
            Self::Merged => pr.is_merged(),
        }
    }
}

/// Keep the PRs matching `filter`, preserving order
pub fn filter_pulls(pulls: &[PullRequest], filter: PrStateFilter) -> Vec<PullRequest> {
    pulls.iter().filter(|pr| filter.matches(pr)).cloned().collect()
}
