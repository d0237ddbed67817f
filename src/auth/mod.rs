//! Authentication for GitHub and Linear
//!
//! GitHub tokens come from environment variables or the `gh` CLI.
//! Linear API keys come from a flag, the environment, or the config file.

mod github;
mod linear;

pub use github::{GitHubAuthConfig, get_github_auth, github_token_from_env};
pub use linear::{LINEAR_API_KEY_ENV, LinearAuthConfig, get_linear_api_key, pick_linear_api_key};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh)
    Cli,
    /// Token from environment variable
    EnvVar,
    /// Passed explicitly on the command line
    Flag,
    /// Read from the config file
    ConfigFile,
}
