//! Cloud discovery models (CWP `/api/v33.01/cloud/discovery/entities`)

use serde::{Deserialize, Serialize};

/// A discovered cloud resource, defended or not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryEntity {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub arn: Option<String>,

    #[serde(default, rename = "accountID")]
    pub account_id: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub provider: Option<String>,

    /// Resource kind reported by discovery (function, vm, registry, ...)
    #[serde(default)]
    pub service_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_entity() {
        let entity: DiscoveryEntity = serde_json::from_str(
            r#"{"name":"fn-ingest","arn":"arn:aws:lambda:us-east-1:1:function:fn-ingest",
                "accountID":"123","region":"us-east-1","serviceType":"aws-lambda"}"#,
        )
        .unwrap();
        assert_eq!(entity.name.as_deref(), Some("fn-ingest"));
        assert_eq!(entity.account_id.as_deref(), Some("123"));
        assert_eq!(entity.service_type.as_deref(), Some("aws-lambda"));
    }

    #[test]
    fn test_deserialize_sparse_entity() {
        let entity: DiscoveryEntity = serde_json::from_str("{}").unwrap();
        assert!(entity.name.is_none());
        assert!(entity.arn.is_none());
    }
}
