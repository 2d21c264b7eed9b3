//! Definition-repository workflow: the Nix flake counterpart of the domain.

use std::path::PathBuf;

use domainsmith_engine::{Envelope, HandlerFuture};
use domainsmith_templates::Template;
use tracing::info;

use super::{relay, render_into_repo, template_vars};
use crate::events::ProvisionEvent;
use crate::state::{ProvisionDeps, SagaState};
use crate::traits::Vcs;

pub(crate) fn create_repository<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let def_org = state.context.def_org()?;
        deps.hosting
            .create_repository(def_org, &state.request.name)
            .await?;
        info!(org = def_org, name = state.request.name.as_str(), "created definition repository");
        Ok(vec![ProvisionEvent::DefinitionRepositoryCreated])
    })
}

relay!(request_clone => [ProvisionEvent::DefinitionRepositoryCloneRequested]);

pub(crate) fn clone_repository<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let url = state.context.def_url()?;
        let folder = Vcs::clone(deps.vcs.as_ref(), url, &state.request.name).await?;
        deps.vcs
            .create_branch(&folder, &deps.config.default_branch)
            .await?;
        Ok(vec![ProvisionEvent::DefinitionRepositoryCloned { folder }])
    })
}

relay!(
    /// Three independent file branches; flake-lock generation joins them.
    fan_out_repo_files => [
        ProvisionEvent::DefinitionRepositoryReadmeRequested,
        ProvisionEvent::DefinitionRepositoryNixFlakeRequested,
        ProvisionEvent::DefinitionRepositoryPyprojectTemplateRequested,
    ]
);

pub(crate) fn create_readme<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.def_repo_folder()?);
        let vars = template_vars(state)?;
        render_into_repo(deps, &repo, Template::DefinitionReadme, &vars).await?;
        Ok(vec![ProvisionEvent::DefinitionRepositoryReadmeCreated])
    })
}

pub(crate) fn create_nix_flake<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.def_repo_folder()?);
        let vars = template_vars(state)?;
        render_into_repo(deps, &repo, Template::DefinitionFlake, &vars).await?;
        Ok(vec![ProvisionEvent::DefinitionRepositoryNixFlakeCreated])
    })
}

pub(crate) fn create_pyproject_template<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.def_repo_folder()?);
        let mut vars = template_vars(state)?;
        // The packaged tree starts at the first segment of the dotted name.
        let package_root = state
            .request
            .package_segments()
            .first()
            .copied()
            .unwrap_or(state.request.package.as_str());
        vars.insert("package_root", package_root);
        render_into_repo(deps, &repo, Template::PyprojectTemplate, &vars).await?;
        Ok(vec![ProvisionEvent::DefinitionRepositoryPyprojectTemplateCreated])
    })
}

relay!(readme_requests_flake_lock => [ProvisionEvent::DefinitionRepositoryFlakeLockRequested]);
relay!(flake_requests_flake_lock => [ProvisionEvent::DefinitionRepositoryFlakeLockRequested]);
relay!(pyproject_requests_flake_lock => [ProvisionEvent::DefinitionRepositoryFlakeLockRequested]);

pub(crate) fn create_flake_lock<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.def_repo_folder()?);
        deps.flake.update_lock(&repo).await?;
        deps.vcs.add(&repo, "flake.lock").await?;
        Ok(vec![ProvisionEvent::DefinitionRepositoryFlakeLockCreated])
    })
}

relay!(request_sha256_update => [
    ProvisionEvent::UpdateSha256InDefinitionRepositoryNixFlakeRequested
]);

/// Pin the flake to the tagged domain tarball: prefetch its hash and patch
/// it into flake.nix.
pub(crate) fn update_sha256<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.def_repo_folder()?);
        let url = state.context.url()?;
        let version = state.context.version()?;
        let hash = deps.flake.fetch_sha256(url, version, &repo).await?;
        deps.flake.patch_sha256(&hash, &repo).await?;
        deps.vcs.add(&repo, "flake.nix").await?;
        Ok(vec![ProvisionEvent::Sha256InDefinitionRepositoryNixFlakeUpdated])
    })
}

relay!(request_commit => [ProvisionEvent::DefinitionRepositoryCommitRequested]);

pub(crate) fn commit<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.def_repo_folder()?);
        deps.vcs.commit(&repo, "Initial commit", false).await?;
        Ok(vec![ProvisionEvent::DefinitionRepositoryChangesCommitted])
    })
}

relay!(request_tag => [ProvisionEvent::DefinitionRepositoryTagRequested]);

pub(crate) fn tag<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.def_repo_folder()?);
        let version = state.context.version()?;
        deps.vcs.tag(&repo, version, "Initial tag").await?;
        Ok(vec![ProvisionEvent::DefinitionRepositoryChangesTagged])
    })
}

relay!(request_push => [ProvisionEvent::DefinitionRepositoryPushRequested]);

pub(crate) fn push<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.def_repo_folder()?);
        let config = &deps.config;
        deps.vcs
            .push_branch(&repo, &config.default_branch, &config.git_remote)
            .await?;
        deps.vcs.push_tags(&repo, &config.git_remote).await?;
        info!(url = state.context.def_url()?, "pushed definition repository");
        Ok(vec![ProvisionEvent::DefinitionRepositoryChangesPushed])
    })
}

relay!(
    /// Both repositories are live and linked.
    complete_saga => [ProvisionEvent::NewDomainCreated]
);
