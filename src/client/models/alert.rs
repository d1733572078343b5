//! Alert models (CSPM `/v2/alert` and the async CSV export job)

use serde::{Deserialize, Serialize};

/// An open or resolved policy alert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub policy: Option<AlertPolicy>,

    #[serde(default)]
    pub resource: Option<AlertResource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPolicy {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default, rename = "policyType")]
    pub policy_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResource {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub account: Option<String>,

    #[serde(default)]
    pub region: Option<String>,
}

/// Relative-time alert listing filter.
#[derive(Debug, Clone)]
pub struct AlertQuery {
    pub time_amount: u32,
    pub time_unit: String,
    pub severity: Option<String>,
    pub policy_type: Option<String>,
}

impl Default for AlertQuery {
    fn default() -> Self {
        Self {
            time_amount: 2,
            time_unit: "week".to_string(),
            severity: None,
            policy_type: None,
        }
    }
}

impl AlertQuery {
    /// Render as the `/v2/alert` query string.
    pub fn to_query(&self) -> String {
        let mut query = format!(
            "timeType=relative&timeAmount={}&timeUnit={}&detailed=false",
            self.time_amount, self.time_unit
        );
        if let Some(ref severity) = self.severity {
            query.push_str(&format!("&policy.severity={severity}"));
        }
        if let Some(ref policy_type) = self.policy_type {
            query.push_str(&format!("&policy.type={policy_type}"));
        }
        query
    }
}

/// State of an async alert CSV export job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCsvJob {
    pub id: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub status_uri: Option<String>,
}

impl AlertCsvJob {
    /// Terminal success state of the export job.
    pub const READY: &'static str = "READY_TO_DOWNLOAD";

    pub fn is_ready(&self) -> bool {
        self.status.as_deref() == Some(Self::READY)
    }
}
