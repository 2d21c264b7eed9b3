//! Recording fakes for the collaborator traits.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use domainsmith_common::DomainRequest;
use tempfile::TempDir;

use crate::traits::{FlakeTools, Hosting, Vcs};

pub(crate) fn request() -> DomainRequest {
    DomainRequest {
        org: "acme".into(),
        name: "widgets".into(),
        description: "Widget domain".into(),
        package: "acme.widgets".into(),
        github_token: "ghp_secret".into(),
        gpg_key_id: "0xCAFE".into(),
    }
}

/// Records `create_repository` calls as `"org/name"`; fails every call when
/// `fail` is set.
#[derive(Default)]
pub(crate) struct MockHosting {
    pub calls: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl Hosting for MockHosting {
    async fn create_repository(&self, org: &str, name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("{org}/{name}"));
        if self.fail {
            return Err(anyhow!("hosting service rejected {org}/{name}"));
        }
        Ok(())
    }
}

/// Backs clones with real directories under one tempdir so handlers can
/// write files into them; records every other operation as a line.
pub(crate) struct MockVcs {
    root: TempDir,
    pub ops: Mutex<Vec<String>>,
}

impl MockVcs {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
            ops: Mutex::new(Vec::new()),
        }
    }

    pub fn ops_starting_with(&self, prefix: &str) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| op.starts_with(prefix))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Vcs for MockVcs {
    async fn clone(&self, url: &str, name: &str) -> Result<PathBuf> {
        // Derive the folder from the url so the domain and definition clones
        // (same repository name) land in distinct directories.
        let slug: String = url
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        let folder = self.root.path().join(slug);
        std::fs::create_dir_all(&folder)?;
        self.ops
            .lock()
            .unwrap()
            .push(format!("clone {url} {name}"));
        Ok(folder)
    }

    async fn create_branch(&self, repo: &Path, name: &str) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("branch {} {name}", repo.display()));
        Ok(())
    }

    async fn add(&self, repo: &Path, file: &str) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("add {} {file}", repo.display()));
        Ok(())
    }

    async fn commit(&self, repo: &Path, message: &str, signed: bool) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("commit {} {message} signed={signed}", repo.display()));
        Ok(())
    }

    async fn tag(&self, repo: &Path, version: &str, message: &str) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("tag {} {version} {message}", repo.display()));
        Ok(())
    }

    async fn push_branch(&self, repo: &Path, branch: &str, remote: &str) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("push {} {branch} {remote}", repo.display()));
        Ok(())
    }

    async fn push_tags(&self, repo: &Path, remote: &str) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("push-tags {} {remote}", repo.display()));
        Ok(())
    }
}

/// Returns a fixed hash and records lock/patch calls.
#[derive(Default)]
pub(crate) struct MockFlake {
    pub calls: Mutex<Vec<String>>,
}

impl MockFlake {
    pub const HASH: &'static str = "sha256-testhash";
}

#[async_trait]
impl FlakeTools for MockFlake {
    async fn update_lock(&self, repo: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("lock {}", repo.display()));
        Ok(())
    }

    async fn fetch_sha256(&self, url: &str, version: &str, _workdir: &Path) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("fetch {url} {version}"));
        Ok(Self::HASH.to_string())
    }

    async fn patch_sha256(&self, hash: &str, repo: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("patch {hash} {}", repo.display()));
        Ok(())
    }
}
