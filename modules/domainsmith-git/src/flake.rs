//! Nix flake utilities: lock generation and sha256 maintenance.

use std::path::Path;
use std::time::Duration;

use regex::Regex;

use crate::error::{GitError, Result};
use crate::run;

#[derive(Debug, Clone)]
pub struct FlakeCli {
    timeout: Duration,
}

impl FlakeCli {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Generate `flake.lock` for the flake in `repo`.
    pub async fn update_lock(&self, repo: &Path) -> Result<()> {
        run("nix", &["flake", "lock"], repo, self.timeout).await?;
        Ok(())
    }

    /// Prefetch the release tarball for `url` at `version` and return its
    /// sha256 in the format fixed-output derivations expect.
    pub async fn fetch_sha256(&self, url: &str, version: &str, workdir: &Path) -> Result<String> {
        let tarball = format!("{url}/archive/{version}.tar.gz");
        run(
            "nix-prefetch-url",
            &["--unpack", "--type", "sha256", &tarball],
            workdir,
            self.timeout,
        )
        .await
    }

    /// Rewrite the `sha256 = "…";` attribute of `repo/flake.nix` in place.
    pub async fn patch_sha256(&self, hash: &str, repo: &Path) -> Result<()> {
        let flake_path = repo.join("flake.nix");
        if !flake_path.exists() {
            return Err(GitError::FlakeMissing(flake_path));
        }

        let contents = tokio::fs::read_to_string(&flake_path).await?;
        let re = Regex::new(r#"sha256\s*=\s*"[^"]*""#).expect("static regex");
        let patched = re
            .replace(&contents, format!(r#"sha256 = "{hash}""#).as_str())
            .into_owned();
        tokio::fs::write(&flake_path, patched).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn patch_sha256_rewrites_only_the_hash() {
        let dir = tempfile::tempdir().unwrap();
        let flake = dir.path().join("flake.nix");
        std::fs::write(
            &flake,
            concat!(
                "{\n",
                "  src = fetchzip {\n",
                "    url = \"https://github.com/acme/widgets/archive/0.0.0.tar.gz\";\n",
                "    sha256 = \"0000000000000000000000000000000000000000000000000000\";\n",
                "  };\n",
                "}\n"
            ),
        )
        .unwrap();

        let cli = FlakeCli::new(Duration::from_secs(5));
        cli.patch_sha256("1abcd", dir.path()).await.unwrap();

        let patched = std::fs::read_to_string(&flake).unwrap();
        assert!(patched.contains(r#"sha256 = "1abcd""#));
        assert!(patched.contains("archive/0.0.0.tar.gz"));
    }

    #[tokio::test]
    async fn patch_sha256_requires_a_flake() {
        let dir = tempfile::tempdir().unwrap();
        let cli = FlakeCli::new(Duration::from_secs(5));
        let err = cli.patch_sha256("1abcd", dir.path()).await.unwrap_err();
        assert!(matches!(err, GitError::FlakeMissing(_)));
    }
}
