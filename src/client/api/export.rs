//! Async report export API trait

use async_trait::async_trait;

use crate::client::models::AlertCsvJob;
use crate::error::Result;

/// The alert CSV export job: submit, poll, download.
#[async_trait]
pub trait ExportApi: Send + Sync {
    /// Submit a new alert CSV export job.
    async fn submit_alert_csv(&self) -> Result<AlertCsvJob>;

    /// Poll the job's status URI for its current state.
    async fn alert_csv_status(&self, job: &AlertCsvJob) -> Result<AlertCsvJob>;

    /// Download the finished CSV body.
    async fn download_alert_csv(&self, job_id: &str) -> Result<Vec<u8>>;
}
