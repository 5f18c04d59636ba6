mod clone;
mod pull_request;
mod push;

pub use clone::CloneInput;
pub use pull_request::PullRequestInput;
pub use push::PushInput;

use crate::{
    config::Config,
    credentials::{resolve_token, CredentialsProvider, ResolvedToken},
    error::{ActionError, Result},
    server::{ServerLocation, DEFAULT_ORGANIZATION},
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::path::PathBuf;

/// Everything a handler may touch besides its input.
pub struct ActionContext<'a, P> {
    pub workspace_path: PathBuf,
    pub config: &'a Config,
    pub credentials: &'a P,
}

impl<'a, P> ActionContext<'a, P>
where
    P: CredentialsProvider,
{
    pub fn new(workspace_path: impl Into<PathBuf>, config: &'a Config, credentials: &'a P) -> Self {
        ActionContext {
            workspace_path: workspace_path.into(),
            config,
            credentials,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoAction {
    Clone,
    Push,
    PullRequest,
}

impl RepoAction {
    pub const ALL: [RepoAction; 3] = [RepoAction::Clone, RepoAction::Push, RepoAction::PullRequest];

    pub fn from_id(id: &str) -> Option<RepoAction> {
        RepoAction::ALL.into_iter().find(|action| action.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            RepoAction::Clone => "azure:repo:clone",
            RepoAction::Push => "azure:repo:push",
            RepoAction::PullRequest => "azure:repo:pr",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RepoAction::Clone => "Clone an Azure repository into the workspace directory.",
            RepoAction::Push => "Push the content in the workspace to a remote Azure repository.",
            RepoAction::PullRequest => "Create a PR to a repository in Azure DevOps.",
        }
    }

    /// JSON schema of the action input.
    pub fn schema(&self) -> Value {
        match self {
            RepoAction::Clone => clone::schema(),
            RepoAction::Push => push::schema(),
            RepoAction::PullRequest => pull_request::schema(),
        }
    }

    pub async fn run<P>(&self, ctx: &ActionContext<'_, P>, input: Value) -> Result<()>
    where
        P: CredentialsProvider,
    {
        log::info!("Running {}", self.id());

        match self {
            RepoAction::Clone => clone::handle(ctx, parse_input(input)?).await,
            RepoAction::Push => push::handle(ctx, parse_input(input)?).await,
            RepoAction::PullRequest => pull_request::handle(ctx, parse_input(input)?).await,
        }
    }
}

fn parse_input<T>(input: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(input).map_err(|err| ActionError::input(err.to_string()))
}

/// Connection fields shared by every action.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInput {
    pub server: Option<String>,
    pub organization: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for ConnectionInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionInput")
            .field("server", &self.server)
            .field("organization", &self.organization)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub(crate) struct Connection {
    pub location: ServerLocation,
    pub organization: String,
    pub token: ResolvedToken,
}

impl ConnectionInput {
    pub(crate) async fn resolve<P>(&self, ctx: &ActionContext<'_, P>) -> Result<Connection>
    where
        P: CredentialsProvider,
    {
        let location = ServerLocation::parse(self.server.as_deref())?;
        let organization = non_empty(self.organization.clone())
            .unwrap_or_else(|| DEFAULT_ORGANIZATION.to_owned());

        let token = resolve_token(
            &ctx.config.integrations,
            ctx.credentials,
            &location,
            &organization,
            self.token.as_deref(),
        )
        .await?;

        Ok(Connection {
            location,
            organization,
            token,
        })
    }
}

/// Template rendering leaves unset fields as `""`; treat those as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn connection_schema_properties() -> Value {
    serde_json::json!({
        "server": {
            "title": "Server hostname",
            "type": "string",
            "description": "The hostname of the Azure DevOps service. Defaults to dev.azure.com"
        },
        "organization": {
            "title": "Organization Name",
            "type": "string",
            "description": "The name of the organization in Azure DevOps."
        },
        "token": {
            "title": "Authentication Token",
            "type": "string",
            "description": "The token to use for authorization."
        }
    })
}

/// Object schema with `properties` plus the connection fields.
fn object_schema(required: &[&str], properties: Value) -> Value {
    let mut merged = serde_json::Map::new();
    for value in [properties, connection_schema_properties()] {
        if let Value::Object(map) = value {
            merged.extend(map);
        }
    }

    serde_json::json!({
        "type": "object",
        "required": required,
        "properties": merged,
    })
}
