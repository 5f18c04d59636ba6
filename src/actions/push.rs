use super::{non_empty, object_schema, ActionContext, ConnectionInput};
use crate::{
    credentials::CredentialsProvider,
    error::Result,
    git::{AuthorInfo, BranchPublisher, DEFAULT_BRANCH, DEFAULT_REMOTE},
    workspace::resolve_safe_child_path,
};
use serde::Deserialize;
use serde_json::{json, Value};

pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushInput {
    pub branch: Option<String>,
    pub source_path: Option<String>,
    pub git_commit_message: Option<String>,
    pub git_author_name: Option<String>,
    pub git_author_email: Option<String>,
    pub remote: Option<String>,
    #[serde(flatten)]
    pub connection: ConnectionInput,
}

pub(super) fn schema() -> Value {
    object_schema(
        &[],
        json!({
            "branch": {
                "title": "Repository Branch",
                "type": "string",
                "description": "The branch to checkout to. Defaults to main"
            },
            "sourcePath": {
                "title": "Working Subdirectory",
                "type": "string",
                "description": "The subdirectory of the working directory containing the repository."
            },
            "gitCommitMessage": {
                "title": "Git Commit Message",
                "type": "string",
                "description": "Sets the commit message on the repository. The default value is 'Initial commit'"
            },
            "gitAuthorName": {
                "title": "Default Author Name",
                "type": "string",
                "description": "Sets the default author name for the commit. The default value is 'Scaffolder'"
            },
            "gitAuthorEmail": {
                "title": "Default Author Email",
                "type": "string",
                "description": "Sets the default author email for the commit."
            },
            "remote": {
                "title": "Remote Name",
                "type": "string",
                "description": "The name of the remote to push to. Defaults to origin"
            }
        }),
    )
}

pub(super) async fn handle<P>(ctx: &ActionContext<'_, P>, input: PushInput) -> Result<()>
where
    P: CredentialsProvider,
{
    let source_dir = resolve_safe_child_path(&ctx.workspace_path, input.source_path.as_deref())?;
    let branch = non_empty(input.branch).unwrap_or_else(|| DEFAULT_BRANCH.to_owned());
    let remote = non_empty(input.remote).unwrap_or_else(|| DEFAULT_REMOTE.to_owned());

    let scaffolder = &ctx.config.scaffolder;
    let message = non_empty(input.git_commit_message)
        .or_else(|| non_empty(scaffolder.default_commit_message.clone()))
        .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_owned());
    let author = AuthorInfo::resolve(
        input.git_author_name.as_deref(),
        input.git_author_email.as_deref(),
        scaffolder.default_author.as_ref(),
    );

    let connection = input.connection.resolve(ctx).await?;

    log::info!(
        "Pushing {} to {}/{} as {} <{}>",
        source_dir.display(),
        remote,
        branch,
        author.name,
        author.email
    );

    let publisher = BranchPublisher::new(source_dir, &branch, message, connection.token.git_auth())
        .remote(&remote)
        .author(author);

    let outcome = tokio::task::spawn_blocking(move || publisher.publish()).await??;

    if outcome.switched_branch {
        log::info!("Created branch {}", branch);
    }
    log::info!("Pushed commit {} to {}/{}", outcome.commit, remote, branch);

    Ok(())
}
