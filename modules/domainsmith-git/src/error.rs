use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitError>;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("`{command}` timed out")]
    Timeout { command: String },

    #[error("flake file not found at {0}")]
    FlakeMissing(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
