//! RQL config search models (CSPM `/search/api/v2/config`)
//!
//! Used by the tag report to find resources carrying a given tag key.

use serde::{Deserialize, Serialize};

/// Request body for an RQL config search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSearchRequest {
    pub query: String,
    pub limit: usize,
    pub time_range: TimeRange,
    pub with_resource_json: bool,
}

impl ConfigSearchRequest {
    /// RQL search over the trailing 24 hours, resource JSON included.
    pub fn last_day(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
            time_range: TimeRange::relative(24, "hour"),
            with_resource_json: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    #[serde(rename = "relativeTimeType")]
    pub relative_time_type: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: TimeRangeValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeRangeValue {
    pub amount: u32,
    pub unit: String,
}

impl TimeRange {
    pub fn relative(amount: u32, unit: &str) -> Self {
        Self {
            relative_time_type: "BACKWARD".to_string(),
            kind: "relative".to_string(),
            value: TimeRangeValue {
                amount,
                unit: unit.to_string(),
            },
        }
    }
}

/// Response envelope for a config search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSearchResponse {
    #[serde(default)]
    pub items: Vec<ConfigItem>,
}

/// One resource returned by a config search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigItem {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default)]
    pub cloud_type: Option<String>,

    #[serde(default)]
    pub resource_type: Option<String>,

    /// Raw resource JSON, present when `withResourceJson` was requested.
    #[serde(default)]
    pub data: Option<ResourceData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    pub tags: Vec<ResourceTag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceTag {
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub value: Option<String>,
}

impl ConfigItem {
    /// Value of the named tag, when the resource carries it.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .tags
            .iter()
            .find(|tag| tag.key.as_deref() == Some(key))
            .and_then(|tag| tag.value.as_deref())
    }
}
