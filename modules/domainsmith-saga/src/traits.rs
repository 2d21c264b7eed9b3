//! Collaborator contracts.
//!
//! The saga sees its external collaborators through these narrow traits;
//! production impls wrap the `github-client` and `domainsmith-git` crates,
//! tests substitute recording mocks.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use domainsmith_git::{FlakeCli, GitCli};
use github_client::GithubClient;

/// Hosting-service repository creation.
#[async_trait]
pub trait Hosting: Send + Sync {
    async fn create_repository(&self, org: &str, name: &str) -> Result<()>;
}

/// Local version-control operations.
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Clone `url` into a fresh folder owned by the calling branch.
    async fn clone(&self, url: &str, name: &str) -> Result<PathBuf>;
    async fn create_branch(&self, repo: &Path, name: &str) -> Result<()>;
    async fn add(&self, repo: &Path, file: &str) -> Result<()>;
    async fn commit(&self, repo: &Path, message: &str, signed: bool) -> Result<()>;
    async fn tag(&self, repo: &Path, version: &str, message: &str) -> Result<()>;
    async fn push_branch(&self, repo: &Path, branch: &str, remote: &str) -> Result<()>;
    async fn push_tags(&self, repo: &Path, remote: &str) -> Result<()>;
}

/// Nix flake lock and sha256 maintenance.
#[async_trait]
pub trait FlakeTools: Send + Sync {
    async fn update_lock(&self, repo: &Path) -> Result<()>;
    async fn fetch_sha256(&self, url: &str, version: &str, workdir: &Path) -> Result<String>;
    async fn patch_sha256(&self, hash: &str, repo: &Path) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Production impls
// ---------------------------------------------------------------------------

#[async_trait]
impl Hosting for GithubClient {
    async fn create_repository(&self, org: &str, name: &str) -> Result<()> {
        GithubClient::create_repository(self, org, name).await?;
        Ok(())
    }
}

#[async_trait]
impl Vcs for GitCli {
    async fn clone(&self, url: &str, name: &str) -> Result<PathBuf> {
        Ok(GitCli::clone(self, url, name).await?)
    }

    async fn create_branch(&self, repo: &Path, name: &str) -> Result<()> {
        Ok(GitCli::create_branch(self, repo, name).await?)
    }

    async fn add(&self, repo: &Path, file: &str) -> Result<()> {
        Ok(GitCli::add(self, repo, file).await?)
    }

    async fn commit(&self, repo: &Path, message: &str, signed: bool) -> Result<()> {
        Ok(GitCli::commit(self, repo, message, signed).await?)
    }

    async fn tag(&self, repo: &Path, version: &str, message: &str) -> Result<()> {
        Ok(GitCli::tag(self, repo, version, message).await?)
    }

    async fn push_branch(&self, repo: &Path, branch: &str, remote: &str) -> Result<()> {
        Ok(GitCli::push_branch(self, repo, branch, remote).await?)
    }

    async fn push_tags(&self, repo: &Path, remote: &str) -> Result<()> {
        Ok(GitCli::push_tags(self, repo, remote).await?)
    }
}

#[async_trait]
impl FlakeTools for FlakeCli {
    async fn update_lock(&self, repo: &Path) -> Result<()> {
        Ok(FlakeCli::update_lock(self, repo).await?)
    }

    async fn fetch_sha256(&self, url: &str, version: &str, workdir: &Path) -> Result<String> {
        Ok(FlakeCli::fetch_sha256(self, url, version, workdir).await?)
    }

    async fn patch_sha256(&self, hash: &str, repo: &Path) -> Result<()> {
        Ok(FlakeCli::patch_sha256(self, hash, repo).await?)
    }
}

/// Build the production collaborator set.
pub fn production_collaborators(
    token: String,
    api_url: String,
    timeout: Duration,
) -> (GithubClient, GitCli, FlakeCli) {
    (
        GithubClient::with_base_url(token, timeout, api_url),
        GitCli::new(timeout),
        FlakeCli::new(timeout),
    )
}
