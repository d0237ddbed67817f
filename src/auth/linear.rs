//! Linear API key resolution

use super::AuthSource;
use crate::error::{Error, Result};

/// Environment variable holding the Linear API key
pub const LINEAR_API_KEY_ENV: &str = "LINEAR_API_KEY";

/// Resolved Linear credentials
#[derive(Debug, Clone)]
pub struct LinearAuthConfig {
    /// Personal API key
    pub api_key: String,
    /// Where the key came from
    pub source: AuthSource,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

/// Pick the Linear API key: flag, then environment, then config file
pub fn pick_linear_api_key(
    flag: Option<&str>,
    env: Option<&str>,
    config_file: Option<&str>,
) -> Result<LinearAuthConfig> {
    let candidates = [
        (flag, AuthSource::Flag),
        (env, AuthSource::EnvVar),
        (config_file, AuthSource::ConfigFile),
    ];

    candidates
        .into_iter()
        .find_map(|(value, source)| non_empty(value).map(|api_key| LinearAuthConfig { api_key, source }))
        .ok_or_else(|| {
            Error::Config(
                "Linear API key is required. Provide via --linear-api-key or LINEAR_API_KEY env variable."
                    .to_string(),
            )
        })
}

/// Resolve the Linear API key, reading `LINEAR_API_KEY` from the environment
pub fn get_linear_api_key(
    flag: Option<&str>,
    config_file: Option<&str>,
) -> Result<LinearAuthConfig> {
    let env = std::env::var(LINEAR_API_KEY_ENV).ok();
    pick_linear_api_key(flag, env.as_deref(), config_file)
}
