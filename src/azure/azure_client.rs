use super::{auth::AuthHandler, repository_handler::RepositoryHandler};
use crate::{
    error::Result,
    http::{
        request::PullRequestRequest,
        response::PullRequest,
        Client, ClientRequestBuilder,
    },
};
use reqwest::Url;

pub const API_VERSION: &str = "7.1";

/// Client bound to one organization (collection) URL. Built per call.
#[derive(Debug, Clone)]
pub struct AzureDevOpsClient {
    collection_url: Url,
    auth: AuthHandler,
    http: Client,
}

impl AzureDevOpsClient {
    pub fn new(collection_url: Url, auth: AuthHandler) -> Self {
        AzureDevOpsClient {
            collection_url,
            auth,
            http: Client::new(),
        }
    }

    pub fn repository(
        &self,
        project: Option<String>,
        repo_id: impl Into<String>,
    ) -> RepositoryHandler<'_> {
        RepositoryHandler::new(self, project, repo_id)
    }

    pub(super) async fn create_pull_request(
        &self,
        project: Option<&str>,
        repo_id: &str,
        supports_iterations: Option<bool>,
        request: PullRequestRequest,
    ) -> Result<PullRequest> {
        let url = self.pull_requests_url(project, repo_id, supports_iterations);
        log::debug!("creating pull request at {}", url);

        let body = serde_json::to_value(&request)
            .map_err(|cause| crate::http::Error::SerializeRequestError { cause })?;

        let pull_request = self
            .http
            .clone()
            .post(url)
            .json_content_headers()
            .with(|builder| self.auth.apply(builder))
            .json(body)
            .send::<PullRequest>()
            .await?;

        Ok(pull_request)
    }

    fn pull_requests_url(
        &self,
        project: Option<&str>,
        repo_id: &str,
        supports_iterations: Option<bool>,
    ) -> Url {
        let mut url = self.collection_url.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            if let Some(project) = project {
                segments.push(project);
            }
            segments.extend(["_apis", "git", "repositories", repo_id, "pullrequests"]);
        }

        {
            let mut query = url.query_pairs_mut();
            if let Some(supports_iterations) = supports_iterations {
                query.append_pair("supportsIterations", &supports_iterations.to_string());
            }
            query.append_pair("api-version", API_VERSION);
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AzureDevOpsClient {
        AzureDevOpsClient::new(
            Url::parse("https://dev.azure.com/my-org").unwrap(),
            AuthHandler::Bearer("token".to_owned()),
        )
    }

    #[test]
    fn should_build_pull_requests_url() {
        let url = client().pull_requests_url(Some("My Project"), "repo-id", Some(true));

        assert_eq!(
            url.as_str(),
            "https://dev.azure.com/my-org/My%20Project/_apis/git/repositories/repo-id/pullrequests?supportsIterations=true&api-version=7.1"
        );
    }

    #[test]
    fn should_omit_missing_project_and_iterations_flag() {
        let url = client().pull_requests_url(None, "repo-id", None);

        assert_eq!(
            url.as_str(),
            "https://dev.azure.com/my-org/_apis/git/repositories/repo-id/pullrequests?api-version=7.1"
        );
    }
}
