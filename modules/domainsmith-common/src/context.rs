//! The accumulated facts of one provisioning run.
//!
//! `Context` is a typed, append-only record: each key is written exactly once
//! by the step that derives it and is read-only afterwards. Reading a key
//! before its deriving step has run is an ordering bug, not a recoverable
//! condition — readers get a hard error, never a silent default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("context key `{0}` read before it was derived")]
    Missing(&'static str),

    #[error("context key `{0}` written twice")]
    AlreadySet(&'static str),
}

/// Facts derived while a saga run advances. Serialized with the kebab-case
/// keys the wire format expects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Context {
    #[serde(rename = "def-org", skip_serializing_if = "Option::is_none")]
    def_org: Option<String>,
    #[serde(rename = "artifact-org", skip_serializing_if = "Option::is_none")]
    artifact_org: Option<String>,
    #[serde(rename = "url", skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(rename = "def-url", skip_serializing_if = "Option::is_none")]
    def_url: Option<String>,
    #[serde(rename = "version", skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(rename = "repo-folder", skip_serializing_if = "Option::is_none")]
    repo_folder: Option<String>,
    #[serde(rename = "def-repo-folder", skip_serializing_if = "Option::is_none")]
    def_repo_folder: Option<String>,
}

macro_rules! context_key {
    ($field:ident, $setter:ident, $key:literal) => {
        pub fn $field(&self) -> Result<&str, ContextError> {
            self.$field.as_deref().ok_or(ContextError::Missing($key))
        }

        pub fn $setter(&mut self, value: impl Into<String>) -> Result<(), ContextError> {
            if self.$field.is_some() {
                return Err(ContextError::AlreadySet($key));
            }
            self.$field = Some(value.into());
            Ok(())
        }
    };
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    context_key!(def_org, set_def_org, "def-org");
    context_key!(artifact_org, set_artifact_org, "artifact-org");
    context_key!(url, set_url, "url");
    context_key!(def_url, set_def_url, "def-url");
    context_key!(version, set_version, "version");
    context_key!(repo_folder, set_repo_folder, "repo-folder");
    context_key!(def_repo_folder, set_def_repo_folder, "def-repo-folder");
}
