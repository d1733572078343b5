//! Authentication API trait

use async_trait::async_trait;

use crate::error::Result;

/// Session establishment against the CSPM login endpoint.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange the configured credentials for a bearer token.
    ///
    /// A response without a `token` field is an error, never a silently
    /// accepted empty credential.
    async fn authenticate(&self) -> Result<String>;

    /// Authenticate and store the session token for subsequent requests.
    async fn login(&self) -> Result<()>;
}
