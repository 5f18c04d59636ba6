pub mod create_pull_request_builder;

pub use create_pull_request_builder::CreatePullRequestBuilder;

pub trait BuilderExecutor {
    type Output;

    async fn execute(self) -> crate::error::Result<Self::Output>;
}
