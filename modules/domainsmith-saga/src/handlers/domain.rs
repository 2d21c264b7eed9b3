//! Domain-repository workflow: create and populate the code repository.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{Datelike, Utc};
use domainsmith_engine::{Envelope, HandlerFuture};
use domainsmith_templates::{render, Template};
use tracing::info;

use super::{relay, render_into_repo, template_vars};
use crate::events::ProvisionEvent;
use crate::state::{ProvisionDeps, SagaState};
use crate::traits::Vcs;

relay!(request_repository => [ProvisionEvent::DomainRepositoryRequested]);

pub(crate) fn create_repository<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let request = &state.request;
        deps.hosting
            .create_repository(&request.org, &request.name)
            .await?;
        info!(org = request.org.as_str(), name = request.name.as_str(), "created domain repository");
        Ok(vec![ProvisionEvent::DomainRepositoryCreated])
    })
}

relay!(request_clone => [ProvisionEvent::DomainRepositoryCloneRequested]);

pub(crate) fn clone_repository<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let url = state.context.url()?;
        let folder = Vcs::clone(deps.vcs.as_ref(), url, &state.request.name).await?;
        deps.vcs
            .create_branch(&folder, &deps.config.default_branch)
            .await?;
        Ok(vec![ProvisionEvent::DomainRepositoryCloned { folder }])
    })
}

relay!(request_init_files => [ProvisionEvent::DomainRepositoryInitFilesRequested]);

/// Create one package folder per dotted segment of the package name, each
/// with a rendered `__init__.py`, so `a.b.c` yields `a/`, `a/b/`, `a/b/c/`.
pub(crate) fn create_init_files<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.repo_folder()?);
        let year = Utc::now().year().to_string();
        let mut folder = repo.clone();
        let mut rel_path = String::new();
        let mut rel_package = String::new();
        for segment in state.request.package_segments() {
            folder.push(segment);
            tokio::fs::create_dir_all(&folder).await?;
            if rel_path.is_empty() {
                rel_path.push_str(segment);
                rel_package.push_str(segment);
            } else {
                rel_path = format!("{rel_path}/{segment}");
                rel_package = format!("{rel_package}.{segment}");
            }
            let vars = HashMap::from([
                ("org", state.request.org.as_str()),
                ("name", state.request.name.as_str()),
                ("package", rel_package.as_str()),
                ("path", rel_path.as_str()),
                ("year", year.as_str()),
            ]);
            let contents = render(Template::Init.source(), &vars)?;
            tokio::fs::write(folder.join("__init__.py"), contents).await?;
            deps.vcs
                .add(&repo, &format!("{rel_path}/__init__.py"))
                .await?;
        }
        Ok(vec![ProvisionEvent::DomainRepositoryInitFilesCreated])
    })
}

relay!(
    /// Three independent file branches; commit joins them back.
    fan_out_repo_files => [
        ProvisionEvent::DomainRepositoryReadmeRequested,
        ProvisionEvent::DomainRepositoryGitattributesRequested,
        ProvisionEvent::DomainRepositoryGitignoreRequested,
    ]
);

pub(crate) fn create_readme<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.repo_folder()?);
        let vars = template_vars(state)?;
        render_into_repo(deps, &repo, Template::DomainReadme, &vars).await?;
        Ok(vec![ProvisionEvent::DomainRepositoryReadmeCreated])
    })
}

pub(crate) fn create_gitattributes<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.repo_folder()?);
        let vars = template_vars(state)?;
        render_into_repo(deps, &repo, Template::Gitattributes, &vars).await?;
        Ok(vec![ProvisionEvent::DomainRepositoryGitattributesCreated])
    })
}

pub(crate) fn create_gitignore<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.repo_folder()?);
        let vars = template_vars(state)?;
        render_into_repo(deps, &repo, Template::Gitignore, &vars).await?;
        Ok(vec![ProvisionEvent::DomainRepositoryGitignoreCreated])
    })
}

relay!(readme_requests_commit => [ProvisionEvent::DomainRepositoryCommitRequested]);
relay!(gitattributes_requests_commit => [ProvisionEvent::DomainRepositoryCommitRequested]);
relay!(gitignore_requests_commit => [ProvisionEvent::DomainRepositoryCommitRequested]);

pub(crate) fn commit<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.repo_folder()?);
        deps.vcs.commit(&repo, "Initial commit", false).await?;
        Ok(vec![ProvisionEvent::DomainRepositoryChangesCommitted])
    })
}

relay!(request_tag => [ProvisionEvent::DomainRepositoryTagRequested]);

pub(crate) fn tag<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.repo_folder()?);
        let version = state.context.version()?;
        deps.vcs.tag(&repo, version, "Initial tag").await?;
        Ok(vec![ProvisionEvent::DomainRepositoryChangesTagged])
    })
}

relay!(request_push => [ProvisionEvent::DomainRepositoryPushRequested]);

pub(crate) fn push<'a>(
    _event: &'a Envelope<ProvisionEvent>,
    state: &'a SagaState,
    deps: &'a ProvisionDeps,
) -> HandlerFuture<'a, ProvisionEvent> {
    Box::pin(async move {
        let repo = PathBuf::from(state.context.repo_folder()?);
        let config = &deps.config;
        deps.vcs
            .push_branch(&repo, &config.default_branch, &config.git_remote)
            .await?;
        deps.vcs.push_tags(&repo, &config.git_remote).await?;
        info!(url = state.context.url()?, "pushed domain repository");
        Ok(vec![ProvisionEvent::DomainRepositoryChangesPushed])
    })
}

relay!(
    /// The domain repository is live; hand over to the definition workflow.
    request_definition_repository => [ProvisionEvent::DefinitionRepositoryRequested]
);
