//! Alert display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Alert;

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct AlertDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "Policy")]
    pub policy: String,

    #[tabled(rename = "Severity")]
    pub severity: String,

    #[tabled(rename = "Resource")]
    pub resource: String,

    #[tabled(rename = "Account")]
    pub account: String,

    #[tabled(rename = "Status")]
    pub status: String,
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

impl From<&Alert> for AlertDisplay {
    fn from(alert: &Alert) -> Self {
        let policy = alert.policy.as_ref();
        let resource = alert.resource.as_ref();
        Self {
            id: or_na(alert.id.as_deref()),
            policy: or_na(policy.and_then(|p| p.name.as_deref())),
            severity: or_na(policy.and_then(|p| p.severity.as_deref())),
            resource: or_na(resource.and_then(|r| r.name.as_deref())),
            account: or_na(resource.and_then(|r| r.account.as_deref())),
            status: or_na(alert.status.as_deref()),
        }
    }
}
