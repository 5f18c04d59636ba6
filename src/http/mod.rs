pub mod client;
pub mod request;
pub mod request_builder;
pub mod response;

pub use client::{Client, ClientRequestBuilder};

use thiserror::Error;

pub const USER_AGENT_VALUE: &str = "azure-repo-actions";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request failed with status {status}: {message}")]
    GenericResponseError { status: u16, message: String },
    #[error("Failed to send request")]
    SendRequestError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to read response text")]
    ReadResponseTextError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to serialize request body")]
    SerializeRequestError {
        #[source]
        cause: serde_json::Error,
    },
    #[error("Failed to parse response")]
    ParseResponseError {
        #[source]
        cause: serde_json::Error,
    },
    #[error("Invalid header {name}")]
    InvalidHeaderError { name: String },
}
