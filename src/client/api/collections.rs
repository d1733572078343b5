//! Collection write API trait

use async_trait::async_trait;

use crate::client::models::{CspmCollectionSpec, CwpCollectionSpec};
use crate::error::Result;

/// Collection create/update operations.
///
/// Best-effort, last-write-wins: no conflict detection, and no delete
/// operation on this surface.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// Create a CSPM entitlement collection.
    async fn create_cspm_collection(&self, spec: &CspmCollectionSpec) -> Result<()>;

    /// Update a CSPM entitlement collection by id.
    async fn update_cspm_collection(&self, id: &str, spec: &CspmCollectionSpec) -> Result<()>;

    /// Create a CWP console collection.
    async fn create_cwp_collection(&self, spec: &CwpCollectionSpec) -> Result<()>;

    /// Update a CWP console collection by name.
    async fn update_cwp_collection(&self, name: &str, spec: &CwpCollectionSpec) -> Result<()>;
}
