//! Local version-control and Nix flake collaborators.
//!
//! Thin async wrappers over the `git` and `nix` command-line tools. Every
//! call is bounded by a timeout; a timeout is reported like any other
//! command failure.

pub mod error;
pub mod flake;
pub mod git;

pub use error::{GitError, Result};
pub use flake::FlakeCli;
pub use git::GitCli;

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

/// Run a command in `cwd`, enforcing `timeout`. Returns stdout on success.
pub(crate) async fn run(
    program: &str,
    args: &[&str],
    cwd: &Path,
    timeout: Duration,
) -> Result<String> {
    let rendered = format!("{program} {}", args.join(" "));
    tracing::debug!(command = rendered.as_str(), cwd = %cwd.display(), "running");

    let output: Output = tokio::time::timeout(
        timeout,
        Command::new(program).args(args).current_dir(cwd).output(),
    )
    .await
    .map_err(|_| GitError::Timeout {
        command: rendered.clone(),
    })??;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: rendered,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
