use super::{
    client::Client,
    request::HttpRequestBuilder,
    response::{AsyncFrom, Response},
    Error, USER_AGENT_VALUE,
};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
    Method, Url,
};
use serde::de::DeserializeOwned;

pub trait RequestType {}
pub struct Post;

impl RequestType for Post {}

pub struct InitBuilder {}

impl InitBuilder {
    pub fn post(client: Client, url: Url) -> RequestBuilder<Post> {
        RequestBuilder {
            _marker: std::marker::PhantomData,
            client,
            builder: HttpRequestBuilder::new(Method::POST, url),
        }
    }
}

pub struct RequestBuilder<T: RequestType> {
    _marker: std::marker::PhantomData<T>,
    client: Client,
    pub builder: HttpRequestBuilder,
}

impl<T> RequestBuilder<T>
where
    T: RequestType,
{
    /// Sends the request and decodes a 2xx JSON body into `R`.
    pub async fn send<R>(self) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.client.send(self.builder).await?;

        Response::<R>::async_from(response).await.collect()
    }

    pub fn json_content_headers(mut self) -> Self {
        self.builder
            .header(ACCEPT.as_str(), "application/json")
            .header(USER_AGENT.as_str(), USER_AGENT_VALUE)
            .header(CONTENT_TYPE.as_str(), "application/json");

        self
    }

    pub fn with(mut self, f: impl FnOnce(&mut HttpRequestBuilder)) -> Self {
        f(&mut self.builder);
        self
    }
}

impl RequestBuilder<Post> {
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.builder.json(body);
        self
    }
}
