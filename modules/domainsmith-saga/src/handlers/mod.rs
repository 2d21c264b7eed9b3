//! Workflow step handlers.
//!
//! Each handler reacts to one event type, performs at most one side effect
//! through the collaborators, and returns the successor event(s). Pure
//! relays (a `*Created` event requesting the next step) are generated by
//! the `relay!` macro; everything that touches a collaborator is written
//! out in full.

pub(crate) mod definition;
pub(crate) mod domain;

#[cfg(test)]
mod saga_tests;

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use domainsmith_common::ContextError;
use domainsmith_engine::HandlerRegistry;
use domainsmith_templates::{render, Template};

use crate::events::{event_type::*, ProvisionEvent};
use crate::state::{ProvisionDeps, SagaState};

/// A handler that performs no side effect and just emits its successors.
macro_rules! relay {
    ($(#[$meta:meta])* $name:ident => [$($next:expr),+ $(,)?]) => {
        $(#[$meta])*
        pub(crate) fn $name<'a>(
            _event: &'a domainsmith_engine::Envelope<crate::events::ProvisionEvent>,
            _state: &'a crate::state::SagaState,
            _deps: &'a crate::state::ProvisionDeps,
        ) -> domainsmith_engine::HandlerFuture<'a, crate::events::ProvisionEvent> {
            Box::pin(async move { Ok(vec![$($next),+]) })
        }
    };
}
pub(crate) use relay;

/// The full registration table, built once at startup.
///
/// `saga:new_domain_created` is the only type left unregistered: no handler
/// means terminal, which is how the run ends.
pub fn build_registry() -> HandlerRegistry<ProvisionEvent, SagaState, ProvisionDeps> {
    let mut registry = HandlerRegistry::new();

    // Domain-repository workflow
    registry.on(NEW_DOMAIN_REQUESTED, domain::request_repository);
    registry.on(DOMAIN_REPOSITORY_REQUESTED, domain::create_repository);
    registry.on(DOMAIN_REPOSITORY_CREATED, domain::request_clone);
    registry.on(DOMAIN_CLONE_REQUESTED, domain::clone_repository);
    registry.on(DOMAIN_CLONED, domain::request_init_files);
    registry.on(DOMAIN_INIT_FILES_REQUESTED, domain::create_init_files);
    registry.on(DOMAIN_INIT_FILES_CREATED, domain::fan_out_repo_files);
    registry.on(DOMAIN_README_REQUESTED, domain::create_readme);
    registry.on(DOMAIN_README_CREATED, domain::readme_requests_commit);
    registry.on(DOMAIN_GITATTRIBUTES_REQUESTED, domain::create_gitattributes);
    registry.on(DOMAIN_GITATTRIBUTES_CREATED, domain::gitattributes_requests_commit);
    registry.on(DOMAIN_GITIGNORE_REQUESTED, domain::create_gitignore);
    registry.on(DOMAIN_GITIGNORE_CREATED, domain::gitignore_requests_commit);
    // Commit waits for all three file branches.
    registry.join(DOMAIN_COMMIT_REQUESTED, 3);
    registry.on(DOMAIN_COMMIT_REQUESTED, domain::commit);
    registry.on(DOMAIN_CHANGES_COMMITTED, domain::request_tag);
    registry.on(DOMAIN_TAG_REQUESTED, domain::tag);
    registry.on(DOMAIN_CHANGES_TAGGED, domain::request_push);
    registry.on(DOMAIN_PUSH_REQUESTED, domain::push);
    registry.on(DOMAIN_CHANGES_PUSHED, domain::request_definition_repository);

    // Definition-repository workflow
    registry.on(DEFINITION_REPOSITORY_REQUESTED, definition::create_repository);
    registry.on(DEFINITION_REPOSITORY_CREATED, definition::request_clone);
    registry.on(DEFINITION_CLONE_REQUESTED, definition::clone_repository);
    registry.on(DEFINITION_CLONED, definition::fan_out_repo_files);
    registry.on(DEFINITION_README_REQUESTED, definition::create_readme);
    registry.on(DEFINITION_README_CREATED, definition::readme_requests_flake_lock);
    registry.on(DEFINITION_NIX_FLAKE_REQUESTED, definition::create_nix_flake);
    registry.on(DEFINITION_NIX_FLAKE_CREATED, definition::flake_requests_flake_lock);
    registry.on(
        DEFINITION_PYPROJECT_TEMPLATE_REQUESTED,
        definition::create_pyproject_template,
    );
    registry.on(
        DEFINITION_PYPROJECT_TEMPLATE_CREATED,
        definition::pyproject_requests_flake_lock,
    );
    // Lock generation waits for all three rendered files.
    registry.join(DEFINITION_FLAKE_LOCK_REQUESTED, 3);
    registry.on(DEFINITION_FLAKE_LOCK_REQUESTED, definition::create_flake_lock);
    registry.on(DEFINITION_FLAKE_LOCK_CREATED, definition::request_sha256_update);
    registry.on(DEFINITION_SHA256_UPDATE_REQUESTED, definition::update_sha256);
    registry.on(DEFINITION_SHA256_UPDATED, definition::request_commit);
    registry.on(DEFINITION_COMMIT_REQUESTED, definition::commit);
    registry.on(DEFINITION_CHANGES_COMMITTED, definition::request_tag);
    registry.on(DEFINITION_TAG_REQUESTED, definition::tag);
    registry.on(DEFINITION_CHANGES_TAGGED, definition::request_push);
    registry.on(DEFINITION_PUSH_REQUESTED, definition::push);
    registry.on(DEFINITION_CHANGES_PUSHED, definition::complete_saga);

    registry
}

/// Template variables shared by every rendered file: the request fields plus
/// the root-derived Context facts.
pub(crate) fn template_vars<'a>(
    state: &'a SagaState,
) -> Result<HashMap<&'a str, &'a str>, ContextError> {
    let request = &state.request;
    let ctx = &state.context;
    Ok(HashMap::from([
        ("org", request.org.as_str()),
        ("name", request.name.as_str()),
        ("description", request.description.as_str()),
        ("package", request.package.as_str()),
        ("def_org", ctx.def_org()?),
        ("url", ctx.url()?),
        ("def_url", ctx.def_url()?),
        ("version", ctx.version()?),
    ]))
}

/// Render a template into the working copy and stage it.
pub(crate) async fn render_into_repo(
    deps: &ProvisionDeps,
    repo: &Path,
    template: Template,
    vars: &HashMap<&str, &str>,
) -> Result<()> {
    let contents = render(template.source(), vars)?;
    tokio::fs::write(repo.join(template.file_name()), contents).await?;
    deps.vcs.add(repo, template.file_name()).await?;
    Ok(())
}
