//! Cloud account display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::CloudAccount;

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct AccountDisplay {
    #[tabled(rename = "Account ID")]
    pub account_id: String,

    #[tabled(rename = "Name")]
    pub name: String,

    #[tabled(rename = "Cloud")]
    pub cloud_type: String,

    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&CloudAccount> for AccountDisplay {
    fn from(account: &CloudAccount) -> Self {
        Self {
            account_id: account.account_id.clone().unwrap_or_else(|| "N/A".to_string()),
            name: account.name.clone().unwrap_or_else(|| "N/A".to_string()),
            cloud_type: account.cloud_type.clone().unwrap_or_else(|| "N/A".to_string()),
            status: match account.enabled {
                Some(true) => "enabled".to_string(),
                Some(false) => "disabled".to_string(),
                None => "unknown".to_string(),
            },
        }
    }
}
