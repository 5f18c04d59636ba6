use super::{object_schema, ActionContext, ConnectionInput};
use crate::{
    azure::{
        builder::create_pull_request_builder::DEFAULT_TARGET_BRANCH, AzureDevOpsClient,
        BuilderExecutor,
    },
    credentials::CredentialsProvider,
    error::Result,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestInput {
    pub source_branch: String,
    pub target_branch: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub repo_id: String,
    pub project: Option<String>,
    pub supports_iterations: Option<bool>,
    #[serde(flatten)]
    pub connection: ConnectionInput,
}

pub(super) fn schema() -> Value {
    object_schema(
        &["sourceBranch", "repoId", "title"],
        json!({
            "sourceBranch": {
                "title": "Source Branch",
                "type": "string",
                "description": "The branch to merge into the target."
            },
            "targetBranch": {
                "title": "Target Branch",
                "type": "string",
                "description": "The branch to merge into. Defaults to main"
            },
            "title": {
                "title": "Title",
                "type": "string",
                "description": "The title of the pull request."
            },
            "description": {
                "title": "Description",
                "type": "string",
                "description": "The description of the pull request."
            },
            "repoId": {
                "title": "Remote Repo ID",
                "type": "string",
                "description": "Repo ID of the pull request."
            },
            "project": {
                "title": "ADO Project",
                "type": "string",
                "description": "The Project in Azure DevOps."
            },
            "supportsIterations": {
                "title": "Supports Iterations",
                "type": "boolean",
                "description": "Whether or not the PR supports iterations."
            }
        }),
    )
}

pub(super) async fn handle<P>(ctx: &ActionContext<'_, P>, input: PullRequestInput) -> Result<()>
where
    P: CredentialsProvider,
{
    let target_branch = input
        .target_branch
        .unwrap_or_else(|| DEFAULT_TARGET_BRANCH.to_owned());

    let connection = input.connection.resolve(ctx).await?;

    let client = AzureDevOpsClient::new(
        connection.location.collection_url(&connection.organization),
        connection.token.auth_handler(),
    );

    log::info!(
        "Creating pull request {} -> {} in {}",
        input.source_branch,
        target_branch,
        input.repo_id
    );

    let pull_request = client
        .repository(input.project, input.repo_id)
        .create_pull_request()
        .source_branch(input.source_branch)
        .target_branch(target_branch)
        .title(input.title)
        .description(input.description)
        .supports_iterations(input.supports_iterations)
        .execute()
        .await?;

    log::info!(
        "Created pull request {} ({})",
        pull_request.pull_request_id,
        pull_request.status
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        actions::{ActionContext, RepoAction},
        config::{AzureCredentialConfig, AzureIntegrationConfig, Config, IntegrationsConfig},
        credentials::IntegrationsCredentialsProvider,
        error::ActionError,
    };
    use anyhow::Result;
    use base64::{prelude::BASE64_STANDARD, Engine};
    use mockito::{Matcher, Server};
    use reqwest::Url;
    use serde_json::json;

    fn config_for(server_url: &str, token: Option<&str>) -> Config {
        let url = Url::parse(server_url).unwrap();
        let host = format!("{}:{}", url.host_str().unwrap(), url.port().unwrap());

        Config {
            integrations: IntegrationsConfig {
                azure: vec![AzureIntegrationConfig {
                    host,
                    credentials: token
                        .map(|token| AzureCredentialConfig {
                            organizations: None,
                            personal_access_token: None,
                            token: Some(token.to_owned()),
                        })
                        .into_iter()
                        .collect(),
                }],
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn should_default_target_branch_to_main() -> Result<()> {
        let mut server = Server::new_async().await;
        let config = config_for(&server.url(), None);
        let provider = IntegrationsCredentialsProvider::from_config(&config);
        let ctx = ActionContext::new("/tmp/workspace", &config, &provider);

        let m = server
            .mock(
                "POST",
                "/my-org/project/_apis/git/repositories/repo-id/pullrequests",
            )
            .match_query(Matcher::UrlEncoded("api-version".into(), "7.1".into()))
            .match_header(
                "authorization",
                format!("Basic {}", BASE64_STANDARD.encode("PAT:explicit")).as_str(),
            )
            .match_body(Matcher::Json(json!({
                "sourceRefName": "refs/heads/feature-x",
                "targetRefName": "refs/heads/main",
                "title": "Feature X"
            })))
            .with_status(201)
            .with_body(r#"{"pullRequestId": 1, "status": "active"}"#)
            .create_async()
            .await;

        RepoAction::PullRequest
            .run(
                &ctx,
                json!({
                    "server": server.url(),
                    "organization": "my-org",
                    "project": "project",
                    "repoId": "repo-id",
                    "sourceBranch": "feature-x",
                    "title": "Feature X",
                    "token": "explicit"
                }),
            )
            .await?;

        m.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn should_use_bearer_handler_for_provider_token() -> Result<()> {
        let mut server = Server::new_async().await;
        let config = config_for(&server.url(), Some("provider-token"));
        let provider = IntegrationsCredentialsProvider::from_config(&config);
        let ctx = ActionContext::new("/tmp/workspace", &config, &provider);

        let m = server
            .mock(
                "POST",
                "/my-org/_apis/git/repositories/repo-id/pullrequests",
            )
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("supportsIterations".into(), "true".into()),
                Matcher::UrlEncoded("api-version".into(), "7.1".into()),
            ]))
            .match_header("authorization", "Bearer provider-token")
            .match_body(Matcher::PartialJson(json!({
                "targetRefName": "refs/heads/develop"
            })))
            .with_status(201)
            .with_body(r#"{"pullRequestId": 2, "status": "active"}"#)
            .create_async()
            .await;

        RepoAction::PullRequest
            .run(
                &ctx,
                json!({
                    "server": server.url(),
                    "organization": "my-org",
                    "repoId": "repo-id",
                    "sourceBranch": "feature-x",
                    "targetBranch": "develop",
                    "title": "Feature X",
                    "supportsIterations": true
                }),
            )
            .await?;

        m.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn should_not_call_api_without_credentials() -> Result<()> {
        let mut server = Server::new_async().await;
        let config = config_for(&server.url(), None);
        let provider = IntegrationsCredentialsProvider::from_config(&config);
        let ctx = ActionContext::new("/tmp/workspace", &config, &provider);

        let m = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let result = RepoAction::PullRequest
            .run(
                &ctx,
                json!({
                    "server": server.url(),
                    "organization": "my-org",
                    "repoId": "repo-id",
                    "sourceBranch": "feature-x",
                    "title": "Feature X"
                }),
            )
            .await;

        m.assert_async().await;
        assert!(matches!(result, Err(ActionError::Credential { .. })));

        Ok(())
    }
}
