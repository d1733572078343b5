//! Tag report display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::ConfigItem;

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TagDisplay {
    #[tabled(rename = "Resource ID")]
    pub resource_id: String,

    #[tabled(rename = "Account")]
    pub account_id: String,

    #[tabled(rename = "Cloud")]
    pub cloud_type: String,

    #[tabled(rename = "Type")]
    pub resource_type: String,

    #[tabled(rename = "Tag Value")]
    pub value: String,
}

impl TagDisplay {
    /// Flatten a config search hit for one tag key. Resources that do
    /// not carry the key show an empty value rather than disappearing.
    pub fn for_key(item: &ConfigItem, key: &str) -> Self {
        Self {
            resource_id: item.id.clone().unwrap_or_else(|| "N/A".to_string()),
            account_id: item.account_id.clone().unwrap_or_else(|| "N/A".to_string()),
            cloud_type: item.cloud_type.clone().unwrap_or_else(|| "N/A".to_string()),
            resource_type: item.resource_type.clone().unwrap_or_else(|| "N/A".to_string()),
            value: item.tag_value(key).unwrap_or_default().to_string(),
        }
    }
}
