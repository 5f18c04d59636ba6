use super::{
    request::HttpRequestBuilder,
    request_builder::{InitBuilder, Post, RequestBuilder},
    Error,
};
use reqwest::Url;

#[derive(Clone, Debug)]
pub struct Client(reqwest::Client);

impl Client {
    pub fn new() -> Client {
        Client(reqwest::Client::new())
    }

    pub async fn send(&self, request: HttpRequestBuilder) -> Result<reqwest::Response, Error> {
        let mut builder = self
            .0
            .request(request.method, request.url)
            .headers(request.headers.try_into()?);

        if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        builder
            .send()
            .await
            .map_err(|cause| Error::SendRequestError { cause })
    }
}

pub trait ClientRequestBuilder {
    fn post(self, url: Url) -> RequestBuilder<Post>;
}

impl ClientRequestBuilder for Client {
    fn post(self, url: Url) -> RequestBuilder<Post> {
        InitBuilder::post(self, url)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
