//! Scaffolder actions for Azure DevOps repositories: `azure:repo:clone`,
//! `azure:repo:push` and `azure:repo:pr`.
//!
//! The host builds an [`ActionContext`] with its configuration and a
//! [`CredentialsProvider`], looks the action up with [`RepoAction::from_id`]
//! and runs it with the JSON input of the template step.

pub mod actions;
pub mod azure;
pub mod config;
pub mod credentials;
pub mod error;
pub mod git;
pub mod http;
pub mod logger;
pub mod server;
pub mod workspace;

pub use actions::{ActionContext, RepoAction};
pub use config::Config;
pub use credentials::{
    CredentialKind, Credentials, CredentialsProvider, IntegrationsCredentialsProvider,
};
pub use error::{ActionError, UpstreamError};
