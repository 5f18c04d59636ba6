mod pull_request_response;
mod state;

pub use pull_request_response::PullRequest;
pub use state::AsyncFrom;
pub use state::Response;
