//! Listing API trait for resource collection reads

use async_trait::async_trait;

use crate::client::models::{
    Alert, AlertQuery, CloudAccount, ConfigItem, CspmCollection, CwpCollection, Defender,
    DiscoveryEntity, Image,
};
use crate::client::pagination::{PageOutcome, PageQuery};
use crate::error::Result;

/// Read operations against both API surfaces.
///
/// Paged methods return one [`PageOutcome`] per call; callers drive the
/// offset loop (see [`crate::pipeline::run_export`]). One-shot methods
/// return the full collection in a single response.
#[async_trait]
pub trait ListingApi: Send + Sync {
    // ========================================================================
    // Paged CWP endpoints
    // ========================================================================

    /// Fetch one page of deployed defender agents.
    async fn defenders_page(&self, query: PageQuery) -> Result<PageOutcome<Defender>>;

    /// Fetch one page of undefended discovery entities for a provider.
    async fn undefended_page(
        &self,
        provider: &str,
        query: PageQuery,
    ) -> Result<PageOutcome<DiscoveryEntity>>;

    /// Fetch one page of scanned container images.
    async fn images_page(&self, query: PageQuery) -> Result<PageOutcome<Image>>;

    // ========================================================================
    // One-shot reads
    // ========================================================================

    /// Console release version, e.g. `33.3.138`.
    async fn console_version(&self) -> Result<String>;

    /// All onboarded cloud accounts.
    async fn list_accounts(&self) -> Result<Vec<CloudAccount>>;

    /// Alerts matching a relative-time filter.
    async fn list_alerts(&self, query: &AlertQuery) -> Result<Vec<Alert>>;

    /// All CSPM entitlement collections.
    async fn list_cspm_collections(&self) -> Result<Vec<CspmCollection>>;

    /// All CWP console collections.
    async fn list_cwp_collections(&self) -> Result<Vec<CwpCollection>>;

    /// RQL config search, returning matched resources.
    async fn search_config(&self, rql: &str, limit: usize) -> Result<Vec<ConfigItem>>;
}
