use crate::{
    config::DEFAULT_AZURE_HOST,
    error::{ActionError, Result},
};
use reqwest::Url;

/// Placeholder organization used only to form a URL when none is given.
pub const DEFAULT_ORGANIZATION: &str = "notempty";

/// Where the Azure DevOps instance lives. Accepts a bare host
/// (`dev.azure.com`, `tfs.example.com:8443`) or an absolute base URL
/// (`http://tfs.internal:8080/tfs`); bare hosts are reached over https.
#[derive(Debug, Clone)]
pub struct ServerLocation {
    base: Url,
}

impl ServerLocation {
    pub fn parse(server: Option<&str>) -> Result<Self> {
        let server = server
            .map(str::trim)
            .filter(|server| !server.is_empty())
            .unwrap_or(DEFAULT_AZURE_HOST);

        let raw = if server.contains("://") {
            server.to_owned()
        } else {
            format!("https://{}", server)
        };

        let base = Url::parse(&raw)
            .map_err(|err| ActionError::input(format!("Invalid server {}: {}", server, err)))?;

        if base.host_str().is_none() || base.cannot_be_a_base() {
            return Err(ActionError::input(format!(
                "Invalid server {}: missing host",
                server
            )));
        }

        Ok(ServerLocation { base })
    }

    /// Key used to find the integration: `host` or `host:port`.
    pub fn host(&self) -> String {
        host_key(&self.base).unwrap_or_default()
    }

    /// `https://<server>/<organization>`, the URL credentials are looked up by.
    pub fn organization_url(&self, organization: &str) -> Url {
        let mut url = self.collection_url(organization);
        if url.scheme() != "https" {
            // switching between special schemes cannot fail
            let _ = url.set_scheme("https");
        }
        url
    }

    /// Base of the REST API for `organization`, keeping the configured scheme.
    pub fn collection_url(&self, organization: &str) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(organization);
        }
        url
    }
}

pub(crate) fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_dev_azure_com() {
        let location = ServerLocation::parse(None).unwrap();

        assert_eq!(location.host(), "dev.azure.com");
        assert_eq!(
            location.organization_url("my-org").as_str(),
            "https://dev.azure.com/my-org"
        );
    }

    #[test]
    fn should_treat_blank_server_as_missing() {
        let location = ServerLocation::parse(Some("  ")).unwrap();

        assert_eq!(location.host(), "dev.azure.com");
    }

    #[test]
    fn should_keep_port_in_host_key() {
        let location = ServerLocation::parse(Some("tfs.example.com:8443")).unwrap();

        assert_eq!(location.host(), "tfs.example.com:8443");
        assert_eq!(
            location.collection_url("DefaultCollection").as_str(),
            "https://tfs.example.com:8443/DefaultCollection"
        );
    }

    #[test]
    fn should_keep_scheme_for_rest_but_not_for_credentials() {
        let location = ServerLocation::parse(Some("http://tfs.internal:8080/tfs")).unwrap();

        assert_eq!(
            location.collection_url("team").as_str(),
            "http://tfs.internal:8080/tfs/team"
        );
        assert_eq!(
            location.organization_url("team").as_str(),
            "https://tfs.internal:8080/tfs/team"
        );
    }

    #[test]
    fn should_encode_organization_as_single_segment() {
        let location = ServerLocation::parse(None).unwrap();

        assert_eq!(
            location.organization_url("my org/x").as_str(),
            "https://dev.azure.com/my%20org%2Fx"
        );
    }

    #[test]
    fn should_reject_server_without_host() {
        let result = ServerLocation::parse(Some("mailto:someone"));

        assert!(matches!(result, Err(ActionError::Input { .. })));
    }
}
