mod pull_request_request;

pub use pull_request_request::PullRequestRequest;

use super::Error;
use base64::{prelude::BASE64_STANDARD, Engine};
use reqwest::{
    header::{HeaderName, HeaderValue, AUTHORIZATION},
    Method, Url,
};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone)]
pub struct HttpRequestBuilder {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl HttpRequestBuilder {
    pub fn new(method: Method, url: Url) -> Self {
        HttpRequestBuilder {
            method,
            url,
            headers: HeaderMap::default(),
            body: None,
        }
    }

    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bearer_auth(&mut self, token: impl AsRef<str>) -> &mut Self {
        self.header(
            AUTHORIZATION.as_str(),
            format!("Bearer {}", token.as_ref()),
        )
    }

    pub fn basic_auth(&mut self, username: impl AsRef<str>, password: impl AsRef<str>) -> &mut Self {
        let encoded =
            BASE64_STANDARD.encode(format!("{}:{}", username.as_ref(), password.as_ref()));
        self.header(AUTHORIZATION.as_str(), format!("Basic {}", encoded))
    }

    pub fn json(&mut self, body: serde_json::Value) -> &mut Self {
        self.body = Some(body);
        self
    }
}

/// Ordered header list; validated when converted for sending.
#[derive(Default, Clone, Debug)]
pub struct HeaderMap(pub Vec<(String, String)>);

impl Deref for HeaderMap {
    type Target = Vec<(String, String)>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for HeaderMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl TryFrom<HeaderMap> for reqwest::header::HeaderMap {
    type Error = Error;

    fn try_from(map: HeaderMap) -> Result<Self, Self::Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        for (key, value) in map.0 {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| Error::InvalidHeaderError { name: key.clone() })?;
            let mut value = HeaderValue::from_str(&value)
                .map_err(|_| Error::InvalidHeaderError { name: key.clone() })?;
            if name == AUTHORIZATION {
                value.set_sensitive(true);
            }
            headers.insert(name, value);
        }
        Ok(headers)
    }
}
