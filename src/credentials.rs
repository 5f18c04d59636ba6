use crate::{
    azure::AuthHandler,
    config::{AzureCredentialConfig, Config, IntegrationsConfig},
    error::{ActionError, Result},
    git::GitAuth,
    server::{host_key, ServerLocation},
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    Pat,
    Bearer,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub kind: CredentialKind,
    pub token: String,
}

impl Credentials {
    pub fn pat(token: impl Into<String>) -> Self {
        Credentials {
            kind: CredentialKind::Pat,
            token: token.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials {
            kind: CredentialKind::Bearer,
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("kind", &self.kind)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Maps an organization URL to credentials.
pub trait CredentialsProvider {
    async fn get_credentials(&self, url: &Url) -> Result<Option<Credentials>>;
}

/// Provider backed by the `integrations.azure` configuration.
#[derive(Debug, Clone, Default)]
pub struct IntegrationsCredentialsProvider {
    integrations: IntegrationsConfig,
}

impl IntegrationsCredentialsProvider {
    pub fn new(integrations: IntegrationsConfig) -> Self {
        IntegrationsCredentialsProvider { integrations }
    }

    pub fn from_config(config: &Config) -> Self {
        IntegrationsCredentialsProvider::new(config.integrations.clone())
    }
}

impl CredentialsProvider for IntegrationsCredentialsProvider {
    async fn get_credentials(&self, url: &Url) -> Result<Option<Credentials>> {
        let Some(integration) = host_key(url).and_then(|host| self.integrations.azure_by_host(&host))
        else {
            return Ok(None);
        };

        // segments come back percent-encoded, configured names are plain text
        let organization = url
            .path_segments()
            .and_then(|segments| segments.last())
            .filter(|segment| !segment.is_empty())
            .and_then(|segment| urlencoding::decode(segment).ok());

        let for_organization = organization.and_then(|organization| {
            integration.credentials.iter().find(|credential| {
                credential.organizations.as_ref().is_some_and(|organizations| {
                    organizations
                        .iter()
                        .any(|candidate| candidate.eq_ignore_ascii_case(&organization))
                })
            })
        });

        let credential = for_organization.or_else(|| {
            integration
                .credentials
                .iter()
                .find(|credential| credential.organizations.is_none())
        });

        Ok(credential.and_then(credentials_from_config))
    }
}

fn credentials_from_config(config: &AzureCredentialConfig) -> Option<Credentials> {
    if let Some(token) = &config.personal_access_token {
        return Some(Credentials::pat(token));
    }

    config.token.as_ref().map(Credentials::bearer)
}

/// Token picked for one invocation.
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    credentials: Credentials,
    explicit: bool,
}

impl ResolvedToken {
    /// PAT handler for explicit tokens and `pat` credentials, bearer otherwise.
    pub fn auth_handler(&self) -> AuthHandler {
        if self.explicit || self.credentials.kind == CredentialKind::Pat {
            AuthHandler::PersonalAccessToken(self.credentials.token.clone())
        } else {
            AuthHandler::Bearer(self.credentials.token.clone())
        }
    }

    pub fn git_auth(&self) -> GitAuth {
        GitAuth::new(&self.credentials.token)
    }
}

/// Resolves the token for `organization` on `location`.
///
/// The host must have a registered integration. A non-empty explicit token
/// always wins and the provider is not consulted in that case.
pub async fn resolve_token<P>(
    integrations: &IntegrationsConfig,
    provider: &P,
    location: &ServerLocation,
    organization: &str,
    explicit_token: Option<&str>,
) -> Result<ResolvedToken>
where
    P: CredentialsProvider,
{
    let host = location.host();
    if integrations.azure_by_host(&host).is_none() {
        return Err(ActionError::Configuration { host });
    }

    if let Some(token) = explicit_token.filter(|token| !token.is_empty()) {
        log::debug!("Using token supplied in the action input");
        return Ok(ResolvedToken {
            credentials: Credentials::pat(token),
            explicit: true,
        });
    }

    let url = location.organization_url(organization);
    match provider.get_credentials(&url).await? {
        Some(credentials) => {
            log::debug!("Using {:?} credentials from provider for {}", credentials.kind, url);
            Ok(ResolvedToken {
                credentials,
                explicit: false,
            })
        }
        None => Err(ActionError::Credential {
            url: url.to_string(),
        }),
    }
}
