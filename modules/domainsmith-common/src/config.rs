//! Environment-driven configuration.

use std::env;
use std::time::Duration;

/// Runtime knobs loaded from the environment. Everything has a sensible
/// default; nothing here is a secret (the hosting token arrives via the CLI).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosting API. Overridable so tests can point at a stub.
    pub hosting_api_url: String,

    /// Remote every push targets.
    pub git_remote: String,

    /// Branch created after cloning.
    pub default_branch: String,

    /// Upper bound for any single collaborator call (hosting request, git
    /// command, flake-lock generation). A timeout is a step failure.
    pub collaborator_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            hosting_api_url: env::var("HOSTING_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            git_remote: env::var("GIT_REMOTE").unwrap_or_else(|_| "origin".to_string()),
            default_branch: env::var("DEFAULT_BRANCH").unwrap_or_else(|_| "main".to_string()),
            collaborator_timeout: Duration::from_secs(
                env::var("COLLABORATOR_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(120),
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosting_api_url: "https://api.github.com".to_string(),
            git_remote: "origin".to_string(),
            default_branch: "main".to_string(),
            collaborator_timeout: Duration::from_secs(120),
        }
    }
}
