//! Mock API client for unit tests
//!
//! Scripted responses, call counts, and captured writes, so reconcile
//! and handler logic can be exercised without a live tenant.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{AuthApi, CollectionApi, ExportApi, ListingApi};
use super::models::{
    Alert, AlertCsvJob, AlertQuery, CloudAccount, ConfigItem, CspmCollection, CspmCollectionSpec,
    CwpCollection, CwpCollectionSpec, Defender, DiscoveryEntity, Image,
};
use super::pagination::{PageOutcome, PageQuery};
use crate::error::{ApiError, Result};

/// Call counts for test verification.
#[derive(Debug, Default, Clone)]
pub struct CallCounts {
    pub authenticate: usize,
    pub defenders_page: usize,
    pub undefended_page: usize,
    pub images_page: usize,
    pub list_accounts: usize,
    pub list_cspm_collections: usize,
    pub list_cwp_collections: usize,
    pub create_cspm_collection: usize,
    pub update_cspm_collection: usize,
    pub create_cwp_collection: usize,
    pub update_cwp_collection: usize,
}

/// Scripted mock implementing the API traits.
#[derive(Default)]
pub struct MockPrismaClient {
    token: Mutex<Option<String>>,
    defender_pages: Mutex<VecDeque<Vec<Defender>>>,
    undefended_pages: Mutex<VecDeque<Vec<DiscoveryEntity>>>,
    image_pages: Mutex<VecDeque<Vec<Image>>>,
    accounts: Mutex<Vec<CloudAccount>>,
    alerts: Mutex<Vec<Alert>>,
    cspm_collections: Mutex<Vec<CspmCollection>>,
    cwp_collections: Mutex<Vec<CwpCollection>>,
    config_items: Mutex<Vec<ConfigItem>>,
    console_version: Mutex<String>,
    /// Error injected into the next fetch, consumed on use.
    next_error: Mutex<Option<ApiError>>,
    /// Offsets observed by paged fetches, in call order.
    pub offsets_seen: Mutex<Vec<usize>>,
    /// Names passed to collection create calls, in call order.
    pub created: Mutex<Vec<String>>,
    /// Names passed to collection update calls, in call order.
    pub updated: Mutex<Vec<String>>,
    calls: Mutex<CallCounts>,
}

impl MockPrismaClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defender_pages(self, pages: Vec<Vec<Defender>>) -> Self {
        *self.defender_pages.try_lock().expect("mock builder") = pages.into();
        self
    }

    pub fn with_undefended_pages(self, pages: Vec<Vec<DiscoveryEntity>>) -> Self {
        *self.undefended_pages.try_lock().expect("mock builder") = pages.into();
        self
    }

    pub fn with_image_pages(self, pages: Vec<Vec<Image>>) -> Self {
        *self.image_pages.try_lock().expect("mock builder") = pages.into();
        self
    }

    pub fn with_accounts(self, accounts: Vec<CloudAccount>) -> Self {
        *self.accounts.try_lock().expect("mock builder") = accounts;
        self
    }

    pub fn with_cspm_collections(self, collections: Vec<CspmCollection>) -> Self {
        *self.cspm_collections.try_lock().expect("mock builder") = collections;
        self
    }

    pub fn with_cwp_collections(self, collections: Vec<CwpCollection>) -> Self {
        *self.cwp_collections.try_lock().expect("mock builder") = collections;
        self
    }

    pub fn with_console_version(self, version: &str) -> Self {
        *self.console_version.try_lock().expect("mock builder") = version.to_string();
        self
    }

    pub fn with_next_error(self, error: ApiError) -> Self {
        *self.next_error.try_lock().expect("mock builder") = Some(error);
        self
    }

    pub async fn calls(&self) -> CallCounts {
        self.calls.lock().await.clone()
    }

    async fn take_error(&self) -> Option<ApiError> {
        self.next_error.lock().await.take()
    }

    async fn pop_page<T>(
        &self,
        pages: &Mutex<VecDeque<Vec<T>>>,
        query: PageQuery,
    ) -> Result<PageOutcome<T>> {
        if let Some(err) = self.take_error().await {
            return Err(err.into());
        }
        self.offsets_seen.lock().await.push(query.offset);
        match pages.lock().await.pop_front() {
            Some(records) if !records.is_empty() => Ok(PageOutcome::More(records)),
            _ => Ok(PageOutcome::Exhausted),
        }
    }
}

#[async_trait]
impl AuthApi for MockPrismaClient {
    async fn authenticate(&self) -> Result<String> {
        self.calls.lock().await.authenticate += 1;
        if let Some(err) = self.take_error().await {
            return Err(err.into());
        }
        Ok("mock-token".to_string())
    }

    async fn login(&self) -> Result<()> {
        let token = self.authenticate().await?;
        *self.token.lock().await = Some(token);
        Ok(())
    }
}

#[async_trait]
impl ListingApi for MockPrismaClient {
    async fn defenders_page(&self, query: PageQuery) -> Result<PageOutcome<Defender>> {
        self.calls.lock().await.defenders_page += 1;
        self.pop_page(&self.defender_pages, query).await
    }

    async fn undefended_page(
        &self,
        _provider: &str,
        query: PageQuery,
    ) -> Result<PageOutcome<DiscoveryEntity>> {
        self.calls.lock().await.undefended_page += 1;
        self.pop_page(&self.undefended_pages, query).await
    }

    async fn images_page(&self, query: PageQuery) -> Result<PageOutcome<Image>> {
        self.calls.lock().await.images_page += 1;
        self.pop_page(&self.image_pages, query).await
    }

    async fn console_version(&self) -> Result<String> {
        Ok(self.console_version.lock().await.clone())
    }

    async fn list_accounts(&self) -> Result<Vec<CloudAccount>> {
        self.calls.lock().await.list_accounts += 1;
        Ok(self.accounts.lock().await.clone())
    }

    async fn list_alerts(&self, _query: &AlertQuery) -> Result<Vec<Alert>> {
        Ok(self.alerts.lock().await.clone())
    }

    async fn list_cspm_collections(&self) -> Result<Vec<CspmCollection>> {
        self.calls.lock().await.list_cspm_collections += 1;
        Ok(self.cspm_collections.lock().await.clone())
    }

    async fn list_cwp_collections(&self) -> Result<Vec<CwpCollection>> {
        self.calls.lock().await.list_cwp_collections += 1;
        Ok(self.cwp_collections.lock().await.clone())
    }

    async fn search_config(&self, _rql: &str, _limit: usize) -> Result<Vec<ConfigItem>> {
        Ok(self.config_items.lock().await.clone())
    }
}

#[async_trait]
impl CollectionApi for MockPrismaClient {
    async fn create_cspm_collection(&self, spec: &CspmCollectionSpec) -> Result<()> {
        self.calls.lock().await.create_cspm_collection += 1;
        self.created.lock().await.push(spec.name.clone());
        let mut collections = self.cspm_collections.lock().await;
        let next_id = collections.len() + 1;
        collections.push(CspmCollection {
            id: Some(format!("c-{}", next_id)),
            name: spec.name.clone(),
            asset_groups: spec.asset_groups.clone(),
        });
        Ok(())
    }

    async fn update_cspm_collection(&self, _id: &str, spec: &CspmCollectionSpec) -> Result<()> {
        self.calls.lock().await.update_cspm_collection += 1;
        self.updated.lock().await.push(spec.name.clone());
        Ok(())
    }

    async fn create_cwp_collection(&self, spec: &CwpCollectionSpec) -> Result<()> {
        self.calls.lock().await.create_cwp_collection += 1;
        self.created.lock().await.push(spec.name.clone());
        self.cwp_collections.lock().await.push(CwpCollection {
            name: spec.name.clone(),
            account_ids: spec.account_ids.clone(),
            description: None,
        });
        Ok(())
    }

    async fn update_cwp_collection(&self, _name: &str, spec: &CwpCollectionSpec) -> Result<()> {
        self.calls.lock().await.update_cwp_collection += 1;
        self.updated.lock().await.push(spec.name.clone());
        Ok(())
    }
}

#[async_trait]
impl ExportApi for MockPrismaClient {
    async fn submit_alert_csv(&self) -> Result<AlertCsvJob> {
        Ok(AlertCsvJob {
            id: "job-1".to_string(),
            status: Some("IN_PROGRESS".to_string()),
            status_uri: Some("/alert/csv/job-1/status".to_string()),
        })
    }

    async fn alert_csv_status(&self, job: &AlertCsvJob) -> Result<AlertCsvJob> {
        Ok(AlertCsvJob {
            id: job.id.clone(),
            status: Some(AlertCsvJob::READY.to_string()),
            status_uri: job.status_uri.clone(),
        })
    }

    async fn download_alert_csv(&self, _job_id: &str) -> Result<Vec<u8>> {
        Ok(b"account,name\n1,res-1\n".to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pages_pop_in_order_then_exhaust() {
        let client = MockPrismaClient::new().with_defender_pages(vec![
            vec![Defender::default()],
            vec![Defender::default(), Defender::default()],
        ]);

        let mut query = PageQuery::first(10);
        assert!(matches!(
            client.defenders_page(query).await.unwrap(),
            PageOutcome::More(ref records) if records.len() == 1
        ));
        query = query.next();
        assert!(matches!(
            client.defenders_page(query).await.unwrap(),
            PageOutcome::More(ref records) if records.len() == 2
        ));
        query = query.next();
        assert!(client.defenders_page(query).await.unwrap().is_exhausted());

        assert_eq!(*client.offsets_seen.lock().await, vec![0, 10, 20]);
        assert_eq!(client.calls().await.defenders_page, 3);
    }

    #[tokio::test]
    async fn test_next_error_consumed_once() {
        let client = MockPrismaClient::new()
            .with_image_pages(vec![vec![Image::default()]])
            .with_next_error(ApiError::Server("boom".to_string()));

        let query = PageQuery::first(10);
        assert!(client.images_page(query).await.is_err());
        assert!(matches!(
            client.images_page(query).await.unwrap(),
            PageOutcome::More(_)
        ));
    }

    #[tokio::test]
    async fn test_scripted_listings() {
        let client = MockPrismaClient::new()
            .with_accounts(vec![CloudAccount {
                account_id: Some("1".to_string()),
                ..CloudAccount::default()
            }])
            .with_cspm_collections(vec![CspmCollection {
                name: "FinOps_A".to_string(),
                ..CspmCollection::default()
            }])
            .with_undefended_pages(vec![vec![DiscoveryEntity::default()]])
            .with_console_version("33.03.138");

        assert_eq!(client.list_accounts().await.unwrap().len(), 1);
        assert_eq!(client.list_cspm_collections().await.unwrap().len(), 1);
        assert_eq!(client.console_version().await.unwrap(), "33.03.138");
        assert!(matches!(
            client
                .undefended_page("aws", PageQuery::first(10))
                .await
                .unwrap(),
            PageOutcome::More(_)
        ));
    }
}
