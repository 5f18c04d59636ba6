use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ActionError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("No matching integration configuration for host {host}, please check your integrations config")]
    Configuration { host: String },
    #[error("No credentials provided {url}, please check your integrations config")]
    Credential { url: String },
    #[error("Relative path is not allowed to refer to a directory outside its parent: {}", .path.display())]
    PathSafety { path: PathBuf },
    #[error("Invalid input: {message}")]
    Input { message: String },
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ActionError {
    pub fn input(message: impl Into<String>) -> Self {
        ActionError::Input {
            message: message.into(),
        }
    }
}

/// Failures raised by the git transport or the REST API, surfaced verbatim.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Git(#[from] git2::Error),
    #[error(transparent)]
    Rest(#[from] crate::http::Error),
    #[error("Git task failed")]
    Task {
        #[source]
        cause: tokio::task::JoinError,
    },
}

impl From<git2::Error> for ActionError {
    fn from(err: git2::Error) -> Self {
        ActionError::Upstream(UpstreamError::Git(err))
    }
}

impl From<crate::http::Error> for ActionError {
    fn from(err: crate::http::Error) -> Self {
        ActionError::Upstream(UpstreamError::Rest(err))
    }
}

impl From<tokio::task::JoinError> for ActionError {
    fn from(cause: tokio::task::JoinError) -> Self {
        ActionError::Upstream(UpstreamError::Task { cause })
    }
}
