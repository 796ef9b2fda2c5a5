use crate::error::RemoteError;
use crate::sources::payload::{ListRequest, ListResponse};
use async_trait::async_trait;

/// Transport to a remote listings provider
/// This allows the HTTP client to be swapped out (e.g. for an in-process fake in tests)
#[async_trait]
pub trait ListingsTransport: Send + Sync {
    /// Issue one listing search and return the decoded response
    async fn list(&self, request: &ListRequest) -> Result<ListResponse, RemoteError>;

    /// Get the name of the provider
    fn provider_name(&self) -> &'static str;
}
