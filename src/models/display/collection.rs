//! Collection display model
//!
//! Both API surfaces flatten to the same console row so `collection
//! list` can show either side with one renderer.

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{CspmCollection, CwpCollection};

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CollectionDisplay {
    #[tabled(rename = "Name")]
    pub name: String,

    #[tabled(rename = "Accounts")]
    pub accounts: usize,

    #[tabled(rename = "Surface")]
    pub surface: String,
}

impl From<&CspmCollection> for CollectionDisplay {
    fn from(collection: &CspmCollection) -> Self {
        Self {
            name: collection.name.clone(),
            accounts: collection.asset_groups.account_ids.len(),
            surface: "CSPM".to_string(),
        }
    }
}

impl From<&CwpCollection> for CollectionDisplay {
    fn from(collection: &CwpCollection) -> Self {
        Self {
            name: collection.name.clone(),
            accounts: collection.account_ids.len(),
            surface: "CWP".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::collection::CspmAssetGroups;

    #[test]
    fn test_both_surfaces_flatten() {
        let cspm = CspmCollection {
            name: "FinOps_Payments".to_string(),
            asset_groups: CspmAssetGroups {
                account_ids: vec!["1".to_string(), "2".to_string()],
            },
            ..CspmCollection::default()
        };
        let cwp = CwpCollection {
            name: "Automation_Core".to_string(),
            account_ids: vec!["9".to_string()],
            ..CwpCollection::default()
        };

        let a = CollectionDisplay::from(&cspm);
        assert_eq!(a.accounts, 2);
        assert_eq!(a.surface, "CSPM");

        let b = CollectionDisplay::from(&cwp);
        assert_eq!(b.accounts, 1);
        assert_eq!(b.surface, "CWP");
    }
}
