use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_AZURE_HOST: &str = "dev.azure.com";

const DEFAULT_CONFIG_FILE_NAME: &str = "app-config.yaml";

/// Process-wide, read-only configuration handed to every action.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub scaffolder: ScaffolderConfig,
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

impl Config {
    pub async fn load() -> Result<Config> {
        Config::load_from(DEFAULT_CONFIG_FILE_NAME).await
    }

    pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config_string = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read config file {}", path.display()))?;

        Config::from_yaml(&config_string)
    }

    pub fn from_yaml(yaml: &str) -> Result<Config> {
        let config = serde_yaml::from_str::<Config>(yaml).context("Cannot parse config")?;

        Ok(config)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffolderConfig {
    pub default_author: Option<AuthorConfig>,
    pub default_commit_message: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AuthorConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IntegrationsConfig {
    #[serde(default)]
    pub azure: Vec<AzureIntegrationConfig>,
}

impl IntegrationsConfig {
    /// Finds the Azure integration registered for `host`. `dev.azure.com` is
    /// always known, with no credentials unless configured.
    pub fn azure_by_host(&self, host: &str) -> Option<AzureIntegrationConfig> {
        if let Some(integration) = self
            .azure
            .iter()
            .find(|integration| integration.host.eq_ignore_ascii_case(host))
        {
            return Some(integration.clone());
        }

        if host.eq_ignore_ascii_case(DEFAULT_AZURE_HOST) {
            return Some(AzureIntegrationConfig {
                host: DEFAULT_AZURE_HOST.to_owned(),
                credentials: vec![],
            });
        }

        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureIntegrationConfig {
    pub host: String,
    #[serde(default)]
    pub credentials: Vec<AzureCredentialConfig>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureCredentialConfig {
    pub organizations: Option<Vec<String>>,
    pub personal_access_token: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for AzureCredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureCredentialConfig")
            .field("organizations", &self.organizations)
            .field(
                "personal_access_token",
                &self.personal_access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
