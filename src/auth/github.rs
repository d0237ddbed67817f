//! GitHub token discovery

use super::AuthSource;
use crate::error::{Error, Result};
use tokio::process::Command;

/// Environment variables checked for a GitHub token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Personal access or OAuth token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// First non-empty token from `GH_TOKEN` / `GITHUB_TOKEN`
pub fn github_token_from_env() -> Option<String> {
    TOKEN_ENV_VARS.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

async fn gh_cli_token() -> Result<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .map_err(|e| Error::Auth(format!("Failed to retrieve GitHub auth token via gh: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Auth(format!(
            "Failed to retrieve GitHub auth token via gh: {}",
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Auth(
            "GitHub authentication token is empty. Run `gh auth login` to configure credentials."
                .to_string(),
        ));
    }
    Ok(token)
}

/// Discover a GitHub token: environment first, then `gh auth token`
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    if let Some(token) = github_token_from_env() {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    let token = gh_cli_token().await?;
    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}
