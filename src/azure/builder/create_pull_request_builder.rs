use super::BuilderExecutor;
use crate::{
    azure::azure_client::AzureDevOpsClient,
    error::Result,
    http::{request::PullRequestRequest, response::PullRequest},
};

pub const DEFAULT_TARGET_BRANCH: &str = "main";

pub struct CreatePullRequestBuilder<'a> {
    client: &'a AzureDevOpsClient,
    pub project: Option<String>,
    pub repo_id: String,
    pub title: String,
    pub description: Option<String>,
    pub source_branch: String,
    pub target_branch: String,
    pub supports_iterations: Option<bool>,
}

impl<'a> CreatePullRequestBuilder<'a> {
    pub fn new(
        client: &'a AzureDevOpsClient,
        project: Option<String>,
        repo_id: impl Into<String>,
    ) -> Self {
        CreatePullRequestBuilder {
            client,
            project,
            repo_id: repo_id.into(),
            title: String::new(),
            description: None,
            source_branch: String::new(),
            target_branch: DEFAULT_TARGET_BRANCH.to_owned(),
            supports_iterations: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn source_branch(mut self, source_branch: impl Into<String>) -> Self {
        self.source_branch = source_branch.into();
        self
    }

    pub fn target_branch(mut self, target_branch: impl Into<String>) -> Self {
        self.target_branch = target_branch.into();
        self
    }

    pub fn supports_iterations(mut self, supports_iterations: Option<bool>) -> Self {
        self.supports_iterations = supports_iterations;
        self
    }
}

impl BuilderExecutor for CreatePullRequestBuilder<'_> {
    type Output = PullRequest;

    async fn execute(self) -> Result<Self::Output> {
        let request = PullRequestRequest::new(
            &self.source_branch,
            &self.target_branch,
            self.title,
            self.description,
        );

        self.client
            .create_pull_request(
                self.project.as_deref(),
                &self.repo_id,
                self.supports_iterations,
                request,
            )
            .await
    }
}
