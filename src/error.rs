//! Error types for roadmap-sync

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a roadmap run
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration, detected before any network call
    #[error("{0}")]
    Config(String),

    /// The Linear team identifier matched nothing
    #[error("Unable to resolve Linear team for \"{0}\"")]
    TeamNotFound(String),

    /// Linear API failure (transport, HTTP status, or GraphQL errors)
    #[error("Linear API error: {0}")]
    LinearApi(String),

    /// GitHub API failure
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Credential discovery failed
    #[error("{0}")]
    Auth(String),

    /// Template file could not be read
    #[error("Failed to load template from \"{}\": {message}", path.display())]
    Template {
        /// Offending path
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Template could not be compiled or rendered
    #[error("Failed to render template: {0}")]
    Render(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Self::GitHubApi(source.message),
            other => Self::GitHubApi(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::LinearApi(err.to_string())
    }
}

/// Result alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;
