use super::{non_empty, object_schema, ActionContext, ConnectionInput};
use crate::{
    credentials::CredentialsProvider,
    error::Result,
    git::{RepoCloner, DEFAULT_BRANCH, DEFAULT_REMOTE},
    workspace::resolve_safe_child_path,
};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneInput {
    pub remote_url: String,
    /// Accepted for compatibility with older templates; the clone uses `remoteUrl`.
    pub repo_url: Option<String>,
    pub branch: Option<String>,
    pub target_path: Option<String>,
    pub remote: Option<String>,
    #[serde(flatten)]
    pub connection: ConnectionInput,
}

pub(super) fn schema() -> Value {
    object_schema(
        &["remoteUrl"],
        json!({
            "remoteUrl": {
                "title": "Remote URL",
                "type": "string",
                "description": "The Git URL to the repository."
            },
            "repoUrl": {
                "title": "Repository Location",
                "type": "string",
                "description": "Unused, kept for older templates. Use remoteUrl."
            },
            "branch": {
                "title": "Repository Branch",
                "type": "string",
                "description": "The branch to checkout to. Defaults to main"
            },
            "targetPath": {
                "title": "Working Subdirectory",
                "type": "string",
                "description": "The subdirectory of the working directory to clone the repository into."
            },
            "remote": {
                "title": "Remote Name",
                "type": "string",
                "description": "The name of the remote to register. Defaults to origin"
            }
        }),
    )
}

pub(super) async fn handle<P>(ctx: &ActionContext<'_, P>, input: CloneInput) -> Result<()>
where
    P: CredentialsProvider,
{
    let output_dir = resolve_safe_child_path(&ctx.workspace_path, input.target_path.as_deref())?;
    let branch = non_empty(input.branch).unwrap_or_else(|| DEFAULT_BRANCH.to_owned());
    let remote = non_empty(input.remote).unwrap_or_else(|| DEFAULT_REMOTE.to_owned());

    if let Some(repo_url) = &input.repo_url {
        log::debug!("ignoring repoUrl {}, cloning remoteUrl", loggable_url(repo_url));
    }

    let connection = input.connection.resolve(ctx).await?;

    log::info!(
        "Cloning {} ({}) into {}",
        loggable_url(&input.remote_url),
        branch,
        output_dir.display()
    );

    let cloner = RepoCloner::new(input.remote_url, output_dir, connection.token.git_auth())
        .remote(remote)
        .branch(branch);

    tokio::task::spawn_blocking(move || cloner.clone_repo().map(|_| ())).await??;

    log::info!("Clone finished");

    Ok(())
}

/// `remote_url` without any userinfo; other remote forms are returned as is.
fn loggable_url(remote_url: &str) -> String {
    match Url::parse(remote_url) {
        Ok(mut url) if url.has_authority() => {
            let _ = url.set_password(None);
            let _ = url.set_username("");
            url.to_string()
        }
        _ => remote_url.to_owned(),
    }
}
