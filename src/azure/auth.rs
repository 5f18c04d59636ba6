use crate::http::request::HttpRequestBuilder;

const PAT_USERNAME: &str = "PAT";

/// Authorization scheme applied to every Azure DevOps REST request.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthHandler {
    PersonalAccessToken(String),
    Bearer(String),
}

impl AuthHandler {
    pub fn apply(&self, builder: &mut HttpRequestBuilder) {
        match self {
            AuthHandler::PersonalAccessToken(token) => builder.basic_auth(PAT_USERNAME, token),
            AuthHandler::Bearer(token) => builder.bearer_auth(token),
        };
    }
}

impl std::fmt::Debug for AuthHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthHandler::PersonalAccessToken(_) => f.write_str("PersonalAccessToken(<redacted>)"),
            AuthHandler::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}
