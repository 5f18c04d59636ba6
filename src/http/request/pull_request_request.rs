use serde::Serialize;

/// Body of the Azure DevOps "create pull request" call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestRequest {
    pub source_ref_name: String,
    pub target_ref_name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PullRequestRequest {
    pub fn new(
        source_branch: impl AsRef<str>,
        target_branch: impl AsRef<str>,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            source_ref_name: branch_ref(source_branch.as_ref()),
            target_ref_name: branch_ref(target_branch.as_ref()),
            title: title.into(),
            description,
        }
    }
}

fn branch_ref(branch: &str) -> String {
    format!("refs/heads/{}", branch)
}
