//! Collection models for both API surfaces
//!
//! The CSPM and CWP sides expose collections with different shapes and
//! endpoints: CSPM wraps its list in `{"value": [...]}` and keys updates
//! by collection id; CWP returns a bare array and keys updates by name.

use serde::{Deserialize, Serialize};

/// A CSPM entitlement collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CspmCollection {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub asset_groups: CspmAssetGroups,
}

/// Account scoping inside a CSPM collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CspmAssetGroups {
    #[serde(default)]
    pub account_ids: Vec<String>,
}

/// Envelope for the CSPM collection list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CspmCollectionPage {
    #[serde(default)]
    pub value: Vec<CspmCollection>,
}

/// Request body for CSPM collection create/update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CspmCollectionSpec {
    pub name: String,
    pub asset_groups: CspmAssetGroups,
}

impl CspmCollectionSpec {
    pub fn new(name: impl Into<String>, account_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            asset_groups: CspmAssetGroups { account_ids },
        }
    }
}

/// A CWP console collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CwpCollection {
    pub name: String,

    #[serde(default, rename = "accountIDs")]
    pub account_ids: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for CWP collection create/update.
#[derive(Debug, Clone, Serialize)]
pub struct CwpCollectionSpec {
    pub name: String,

    #[serde(rename = "accountIDs")]
    pub account_ids: Vec<String>,
}

impl CwpCollectionSpec {
    pub fn new(name: impl Into<String>, account_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            account_ids,
        }
    }
}
