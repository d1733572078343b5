//! Defender agent models (CWP `/api/v33.03/defenders`)

use serde::{Deserialize, Serialize};

/// A deployed defender agent as returned by the console.
///
/// Every field is optional on the wire; projection substitutes
/// placeholders rather than failing on sparse records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defender {
    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub cluster: Option<String>,

    #[serde(default)]
    pub last_modified: Option<String>,

    /// Deployment category (host, container, serverless, ...)
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub cloud_metadata: Option<CloudMetadata>,
}

/// Cloud placement metadata nested inside a defender record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudMetadata {
    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default, rename = "accountID")]
    pub account_id: Option<String>,

    #[serde(default)]
    pub region: Option<String>,
}

impl Defender {
    /// Major component of the agent version, when present and numeric.
    pub fn major_version(&self) -> Option<u32> {
        self.version
            .as_deref()
            .and_then(|v| v.split('.').next())
            .and_then(|major| major.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_record() {
        let defender: Defender = serde_json::from_str(r#"{"hostname":"node-1"}"#).unwrap();
        assert_eq!(defender.hostname.as_deref(), Some("node-1"));
        assert!(defender.version.is_none());
        assert!(defender.cloud_metadata.is_none());
    }

    #[test]
    fn test_cloud_metadata_account_id_casing() {
        let defender: Defender = serde_json::from_str(
            r#"{"hostname":"h","cloudMetadata":{"provider":"aws","accountID":"123456789012"}}"#,
        )
        .unwrap();
        let meta = defender.cloud_metadata.unwrap();
        assert_eq!(meta.provider.as_deref(), Some("aws"));
        assert_eq!(meta.account_id.as_deref(), Some("123456789012"));
    }

    #[test]
    fn test_major_version() {
        let mut defender = Defender {
            version: Some("33.3.138".to_string()),
            ..Default::default()
        };
        assert_eq!(defender.major_version(), Some(33));

        defender.version = Some("".to_string());
        assert_eq!(defender.major_version(), None);

        defender.version = None;
        assert_eq!(defender.major_version(), None);
    }
}
