//! Detection of canonical GitHub issue links
//!
//! Only `https://github.com/<owner>/<repo>/issues/<number>` counts. A
//! looser substring check (`github.com` + `/issues/`) would also accept
//! URLs that merely mention an issue path in a query string, so links to
//! PRs, commits, or trailing-slash/query variants are all rejected here.

use regex::Regex;
use std::sync::LazyLock;

static GITHUB_ISSUE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/[^/]+/[^/]+/issues/\d+$").expect("valid issue URL regex")
});

/// Whether `url` is a canonical GitHub issue URL
pub fn is_github_issue_url(url: &str) -> bool {
    GITHUB_ISSUE_URL.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_issue_url_matches() {
        assert!(is_github_issue_url("https://github.com/o/r/issues/10"));
        assert!(is_github_issue_url("https://github.com/acme-co/web.app/issues/1"));
    }

    #[test]
    fn test_non_issue_urls_rejected() {
        for url in [
            "https://github.com/o/r/pull/10",
            "https://example.com/issue/1",
            "https://github.com/o/r/issues/10?tab=x",
            "https://github.com/o/r/issues/10/",
            "http://github.com/o/r/issues/10",
            "https://github.com/o/r/commit/abc123",
            "https://github.com/o/r/issues/abc",
            "https://github.com/o/r/x/issues/10",
            "https://linear.app/x?next=https://github.com/o/r/issues/1",
        ] {
            assert!(!is_github_issue_url(url), "{url} should not match");
        }
    }
}
