//! Onboarded cloud account models (CSPM `/cloud`)

use serde::{Deserialize, Serialize};

/// An onboarded cloud account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudAccount {
    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub cloud_type: Option<String>,

    #[serde(default)]
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_account() {
        let account: CloudAccount = serde_json::from_str(
            r#"{"accountId": "123456789012", "name": "prod", "cloudType": "aws", "enabled": true}"#,
        )
        .unwrap();
        assert_eq!(account.account_id.as_deref(), Some("123456789012"));
        assert_eq!(account.cloud_type.as_deref(), Some("aws"));
        assert_eq!(account.enabled, Some(true));
    }

    #[test]
    fn test_deserialize_sparse_account() {
        let account: CloudAccount = serde_json::from_str("{}").unwrap();
        assert!(account.account_id.is_none());
    }
}
