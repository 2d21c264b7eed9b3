//! Event types for the provisioning saga.
//!
//! Two cooperating workflows share one event enum: the domain-repository
//! workflow (`domain:*`), the definition-repository workflow
//! (`definition:*`), and the saga boundary events (`saga:*`) that root and
//! terminate the run. All variants flow through the same dispatch loop and
//! form causal chains.

use std::path::PathBuf;

use domainsmith_common::DomainRequest;
use domainsmith_engine::SagaEvent;
use serde::{Deserialize, Serialize};

/// Stable type strings, used by the registry wiring and the wire codec.
pub mod event_type {
    pub const NEW_DOMAIN_REQUESTED: &str = "saga:new_domain_requested";
    pub const NEW_DOMAIN_CREATED: &str = "saga:new_domain_created";

    pub const DOMAIN_REPOSITORY_REQUESTED: &str = "domain:repository_requested";
    pub const DOMAIN_REPOSITORY_CREATED: &str = "domain:repository_created";
    pub const DOMAIN_CLONE_REQUESTED: &str = "domain:clone_requested";
    pub const DOMAIN_CLONED: &str = "domain:cloned";
    pub const DOMAIN_INIT_FILES_REQUESTED: &str = "domain:init_files_requested";
    pub const DOMAIN_INIT_FILES_CREATED: &str = "domain:init_files_created";
    pub const DOMAIN_README_REQUESTED: &str = "domain:readme_requested";
    pub const DOMAIN_README_CREATED: &str = "domain:readme_created";
    pub const DOMAIN_GITATTRIBUTES_REQUESTED: &str = "domain:gitattributes_requested";
    pub const DOMAIN_GITATTRIBUTES_CREATED: &str = "domain:gitattributes_created";
    pub const DOMAIN_GITIGNORE_REQUESTED: &str = "domain:gitignore_requested";
    pub const DOMAIN_GITIGNORE_CREATED: &str = "domain:gitignore_created";
    pub const DOMAIN_COMMIT_REQUESTED: &str = "domain:commit_requested";
    pub const DOMAIN_CHANGES_COMMITTED: &str = "domain:changes_committed";
    pub const DOMAIN_TAG_REQUESTED: &str = "domain:tag_requested";
    pub const DOMAIN_CHANGES_TAGGED: &str = "domain:changes_tagged";
    pub const DOMAIN_PUSH_REQUESTED: &str = "domain:push_requested";
    pub const DOMAIN_CHANGES_PUSHED: &str = "domain:changes_pushed";

    pub const DEFINITION_REPOSITORY_REQUESTED: &str = "definition:repository_requested";
    pub const DEFINITION_REPOSITORY_CREATED: &str = "definition:repository_created";
    pub const DEFINITION_CLONE_REQUESTED: &str = "definition:clone_requested";
    pub const DEFINITION_CLONED: &str = "definition:cloned";
    pub const DEFINITION_README_REQUESTED: &str = "definition:readme_requested";
    pub const DEFINITION_README_CREATED: &str = "definition:readme_created";
    pub const DEFINITION_NIX_FLAKE_REQUESTED: &str = "definition:nix_flake_requested";
    pub const DEFINITION_NIX_FLAKE_CREATED: &str = "definition:nix_flake_created";
    pub const DEFINITION_PYPROJECT_TEMPLATE_REQUESTED: &str =
        "definition:pyproject_template_requested";
    pub const DEFINITION_PYPROJECT_TEMPLATE_CREATED: &str =
        "definition:pyproject_template_created";
    pub const DEFINITION_FLAKE_LOCK_REQUESTED: &str = "definition:flake_lock_requested";
    pub const DEFINITION_FLAKE_LOCK_CREATED: &str = "definition:flake_lock_created";
    pub const DEFINITION_SHA256_UPDATE_REQUESTED: &str = "definition:sha256_update_requested";
    pub const DEFINITION_SHA256_UPDATED: &str = "definition:sha256_updated";
    pub const DEFINITION_COMMIT_REQUESTED: &str = "definition:commit_requested";
    pub const DEFINITION_CHANGES_COMMITTED: &str = "definition:changes_committed";
    pub const DEFINITION_TAG_REQUESTED: &str = "definition:tag_requested";
    pub const DEFINITION_CHANGES_TAGGED: &str = "definition:changes_tagged";
    pub const DEFINITION_PUSH_REQUESTED: &str = "definition:push_requested";
    pub const DEFINITION_CHANGES_PUSHED: &str = "definition:changes_pushed";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProvisionEvent {
    // Saga boundary
    NewDomainRequested { request: DomainRequest },
    NewDomainCreated,

    // Domain-repository workflow
    DomainRepositoryRequested,
    DomainRepositoryCreated,
    DomainRepositoryCloneRequested,
    DomainRepositoryCloned { folder: PathBuf },
    DomainRepositoryInitFilesRequested,
    DomainRepositoryInitFilesCreated,
    DomainRepositoryReadmeRequested,
    DomainRepositoryReadmeCreated,
    DomainRepositoryGitattributesRequested,
    DomainRepositoryGitattributesCreated,
    DomainRepositoryGitignoreRequested,
    DomainRepositoryGitignoreCreated,
    DomainRepositoryCommitRequested,
    DomainRepositoryChangesCommitted,
    DomainRepositoryTagRequested,
    DomainRepositoryChangesTagged,
    DomainRepositoryPushRequested,
    DomainRepositoryChangesPushed,

    // Definition-repository workflow
    DefinitionRepositoryRequested,
    DefinitionRepositoryCreated,
    DefinitionRepositoryCloneRequested,
    DefinitionRepositoryCloned { folder: PathBuf },
    DefinitionRepositoryReadmeRequested,
    DefinitionRepositoryReadmeCreated,
    DefinitionRepositoryNixFlakeRequested,
    DefinitionRepositoryNixFlakeCreated,
    DefinitionRepositoryPyprojectTemplateRequested,
    DefinitionRepositoryPyprojectTemplateCreated,
    DefinitionRepositoryFlakeLockRequested,
    DefinitionRepositoryFlakeLockCreated,
    UpdateSha256InDefinitionRepositoryNixFlakeRequested,
    Sha256InDefinitionRepositoryNixFlakeUpdated,
    DefinitionRepositoryCommitRequested,
    DefinitionRepositoryChangesCommitted,
    DefinitionRepositoryTagRequested,
    DefinitionRepositoryChangesTagged,
    DefinitionRepositoryPushRequested,
    DefinitionRepositoryChangesPushed,
}

impl SagaEvent for ProvisionEvent {
    fn event_type(&self) -> &'static str {
        use event_type::*;
        use ProvisionEvent::*;
        match self {
            NewDomainRequested { .. } => NEW_DOMAIN_REQUESTED,
            NewDomainCreated => NEW_DOMAIN_CREATED,

            DomainRepositoryRequested => DOMAIN_REPOSITORY_REQUESTED,
            DomainRepositoryCreated => DOMAIN_REPOSITORY_CREATED,
            DomainRepositoryCloneRequested => DOMAIN_CLONE_REQUESTED,
            DomainRepositoryCloned { .. } => DOMAIN_CLONED,
            DomainRepositoryInitFilesRequested => DOMAIN_INIT_FILES_REQUESTED,
            DomainRepositoryInitFilesCreated => DOMAIN_INIT_FILES_CREATED,
            DomainRepositoryReadmeRequested => DOMAIN_README_REQUESTED,
            DomainRepositoryReadmeCreated => DOMAIN_README_CREATED,
            DomainRepositoryGitattributesRequested => DOMAIN_GITATTRIBUTES_REQUESTED,
            DomainRepositoryGitattributesCreated => DOMAIN_GITATTRIBUTES_CREATED,
            DomainRepositoryGitignoreRequested => DOMAIN_GITIGNORE_REQUESTED,
            DomainRepositoryGitignoreCreated => DOMAIN_GITIGNORE_CREATED,
            DomainRepositoryCommitRequested => DOMAIN_COMMIT_REQUESTED,
            DomainRepositoryChangesCommitted => DOMAIN_CHANGES_COMMITTED,
            DomainRepositoryTagRequested => DOMAIN_TAG_REQUESTED,
            DomainRepositoryChangesTagged => DOMAIN_CHANGES_TAGGED,
            DomainRepositoryPushRequested => DOMAIN_PUSH_REQUESTED,
            DomainRepositoryChangesPushed => DOMAIN_CHANGES_PUSHED,

            DefinitionRepositoryRequested => DEFINITION_REPOSITORY_REQUESTED,
            DefinitionRepositoryCreated => DEFINITION_REPOSITORY_CREATED,
            DefinitionRepositoryCloneRequested => DEFINITION_CLONE_REQUESTED,
            DefinitionRepositoryCloned { .. } => DEFINITION_CLONED,
            DefinitionRepositoryReadmeRequested => DEFINITION_README_REQUESTED,
            DefinitionRepositoryReadmeCreated => DEFINITION_README_CREATED,
            DefinitionRepositoryNixFlakeRequested => DEFINITION_NIX_FLAKE_REQUESTED,
            DefinitionRepositoryNixFlakeCreated => DEFINITION_NIX_FLAKE_CREATED,
            DefinitionRepositoryPyprojectTemplateRequested => {
                DEFINITION_PYPROJECT_TEMPLATE_REQUESTED
            }
            DefinitionRepositoryPyprojectTemplateCreated => DEFINITION_PYPROJECT_TEMPLATE_CREATED,
            DefinitionRepositoryFlakeLockRequested => DEFINITION_FLAKE_LOCK_REQUESTED,
            DefinitionRepositoryFlakeLockCreated => DEFINITION_FLAKE_LOCK_CREATED,
            UpdateSha256InDefinitionRepositoryNixFlakeRequested => {
                DEFINITION_SHA256_UPDATE_REQUESTED
            }
            Sha256InDefinitionRepositoryNixFlakeUpdated => DEFINITION_SHA256_UPDATED,
            DefinitionRepositoryCommitRequested => DEFINITION_COMMIT_REQUESTED,
            DefinitionRepositoryChangesCommitted => DEFINITION_CHANGES_COMMITTED,
            DefinitionRepositoryTagRequested => DEFINITION_TAG_REQUESTED,
            DefinitionRepositoryChangesTagged => DEFINITION_CHANGES_TAGGED,
            DefinitionRepositoryPushRequested => DEFINITION_PUSH_REQUESTED,
            DefinitionRepositoryChangesPushed => DEFINITION_CHANGES_PUSHED,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("ProvisionEvent serialization should never fail")
    }
}
