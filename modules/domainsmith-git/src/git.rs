//! The git CLI client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::run;

/// Clone/branch/add/commit/tag/push against a local working copy.
///
/// Each repository of a saga run gets its own freshly created clone folder;
/// no two branches of the run ever share one.
#[derive(Debug, Clone)]
pub struct GitCli {
    timeout: Duration,
}

impl GitCli {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Clone `url` as `name` inside a fresh temporary folder and return the
    /// path of the working copy.
    pub async fn clone(&self, url: &str, name: &str) -> Result<PathBuf> {
        let parent = tempfile::Builder::new()
            .prefix("domainsmith-")
            .tempdir()?
            .keep();
        run("git", &["clone", url, name], &parent, self.timeout).await?;
        Ok(parent.join(name))
    }

    pub async fn create_branch(&self, repo: &Path, name: &str) -> Result<()> {
        run("git", &["checkout", "-b", name], repo, self.timeout).await?;
        Ok(())
    }

    pub async fn add(&self, repo: &Path, file: &str) -> Result<()> {
        run("git", &["add", file], repo, self.timeout).await?;
        Ok(())
    }

    pub async fn commit(&self, repo: &Path, message: &str, signed: bool) -> Result<()> {
        let mut args = vec!["commit", "-m", message];
        if signed {
            args.push("-S");
        } else {
            args.push("--no-gpg-sign");
        }
        run("git", &args, repo, self.timeout).await?;
        Ok(())
    }

    pub async fn tag(&self, repo: &Path, version: &str, message: &str) -> Result<()> {
        run(
            "git",
            &["tag", "-a", version, "-m", message],
            repo,
            self.timeout,
        )
        .await?;
        Ok(())
    }

    pub async fn push_branch(&self, repo: &Path, branch: &str, remote: &str) -> Result<()> {
        run("git", &["push", "-u", remote, branch], repo, self.timeout).await?;
        Ok(())
    }

    pub async fn push_tags(&self, repo: &Path, remote: &str) -> Result<()> {
        run("git", &["push", remote, "--tags"], repo, self.timeout).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GitError;

    fn git_available() -> bool {
        std::process::Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .is_ok_and(|ok| ok)
    }

    async fn init_repo(dir: &Path) {
        for args in [
            vec!["init"],
            vec!["config", "user.email", "test@example.com"],
            vec!["config", "user.name", "test"],
        ] {
            let out = std::process::Command::new("git")
                .args(&args)
                .current_dir(dir)
                .output()
                .unwrap();
            assert!(out.status.success());
        }
    }

    #[tokio::test]
    async fn add_commit_tag_roundtrip() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path()).await;

        std::fs::write(dir.path().join("README.md"), "# test\n").unwrap();

        let git = GitCli::new(Duration::from_secs(30));
        git.add(dir.path(), "README.md").await.unwrap();
        git.commit(dir.path(), "Initial commit", false).await.unwrap();
        git.tag(dir.path(), "0.0.0", "Initial tag").await.unwrap();

        let tags = std::process::Command::new("git")
            .arg("tag")
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&tags.stdout).trim(), "0.0.0");
    }

    #[tokio::test]
    async fn failed_command_surfaces_stderr() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path()).await;

        let git = GitCli::new(Duration::from_secs(30));
        let err = git.add(dir.path(), "no-such-file").await.unwrap_err();
        match err {
            GitError::CommandFailed { command, .. } => {
                assert!(command.starts_with("git add"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
