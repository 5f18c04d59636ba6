use super::{azure_client::AzureDevOpsClient, builder::CreatePullRequestBuilder};

pub struct RepositoryHandler<'a> {
    client: &'a AzureDevOpsClient,
    project: Option<String>,
    repo_id: String,
}

impl<'a> RepositoryHandler<'a> {
    pub fn new(
        client: &'a AzureDevOpsClient,
        project: Option<String>,
        repo_id: impl Into<String>,
    ) -> Self {
        RepositoryHandler {
            client,
            project,
            repo_id: repo_id.into(),
        }
    }

    pub fn create_pull_request(&self) -> CreatePullRequestBuilder<'a> {
        CreatePullRequestBuilder::new(self.client, self.project.clone(), &self.repo_id)
    }
}
