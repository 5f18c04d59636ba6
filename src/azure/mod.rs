mod auth;
pub mod azure_client;
pub mod builder;
pub mod repository_handler;

pub use auth::AuthHandler;
pub use azure_client::AzureDevOpsClient;
pub use builder::BuilderExecutor;
