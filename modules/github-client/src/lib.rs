//! Minimal GitHub client for repository provisioning.
//!
//! One concern only: creating repositories under an organization. The saga
//! treats everything else about the hosting service as out of scope.

pub mod error;
pub mod types;

pub use error::{GithubError, Result};
pub use types::CreatedRepository;

use std::time::Duration;

use tracing::debug;
use types::CreateRepositoryRequest;

const DEFAULT_BASE_URL: &str = "https://api.github.com";

pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(token: String, timeout: Duration) -> Self {
        Self::with_base_url(token, timeout, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a non-default API host (test stubs, GHE).
    pub fn with_base_url(token: String, timeout: Duration, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("domainsmith")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url,
            token,
        }
    }

    /// Create `org/name`. Not idempotent on the hosting side: a second call
    /// for the same repository is a 422, surfaced as `AlreadyExists`.
    pub async fn create_repository(&self, org: &str, name: &str) -> Result<CreatedRepository> {
        let url = format!("{}/orgs/{}/repos", self.base_url, org);
        debug!(org, name, "creating hosted repository");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&CreateRepositoryRequest {
                name: name.to_string(),
                private: false,
                auto_init: false,
            })
            .send()
            .await?;

        let status = resp.status();
        match status.as_u16() {
            201 => Ok(resp.json::<CreatedRepository>().await?),
            401 | 403 => Err(GithubError::Unauthorized),
            422 => Err(GithubError::AlreadyExists {
                org: org.to_string(),
                name: name.to_string(),
            }),
            _ => {
                let message = resp.text().await.unwrap_or_default();
                Err(GithubError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
