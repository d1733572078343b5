//! Business-unit collection reconciler
//!
//! Reads the business-unit roster from a spreadsheet, groups account ids
//! by unit, and converges the tenant's collections toward that roster.
//! Convergence is one-directional: collections named for a roster unit
//! are created or updated, collections with no roster counterpart are
//! left alone.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use log::{info, warn};

use crate::client::api::CollectionApi;
use crate::client::models::{
    CloudAccount, CspmCollection, CspmCollectionSpec, CwpCollection, CwpCollectionSpec,
};
use crate::error::{Error, Result};

/// Spreadsheet column holding the business-unit name (zero-based).
const BU_COLUMN: usize = 7;
/// Spreadsheet column holding the cloud account id (zero-based).
const ACCOUNT_COLUMN: usize = 10;

/// Sentinel the roster uses for accounts with no assigned unit.
const UNASSIGNED: &str = "_bu:_value_not_provided";
const UNASSIGNED_NAME: &str = "No_Business_Unit";

/// Which API surface the reconciler writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Cspm,
    Cwp,
}

/// A roster business unit with its member accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessUnit {
    /// Collection name, prefix applied and normalized.
    pub name: String,
    /// Sorted, deduplicated account ids.
    pub account_ids: Vec<String>,
}

/// Normalize a roster unit name into a collection name.
///
/// The unassigned sentinel maps to a fixed placeholder; spaces become
/// underscores so the name survives as an API path segment.
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNASSIGNED) {
        return UNASSIGNED_NAME.to_string();
    }
    trimmed.replace(' ', "_")
}

fn cell_text(cell: Option<&Data>) -> Option<String> {
    let text = match cell? {
        Data::String(s) => s.trim().to_string(),
        // Account ids sometimes arrive as numeric cells; keep the
        // integer rendering so "123456789012.0" never leaks out.
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Load business units from the roster spreadsheet.
///
/// Reads the first sheet, skips the header row, and groups account ids
/// by normalized unit name with `prefix` prepended. Rows missing either
/// column are skipped with a warning.
pub fn load_business_units(path: &Path, prefix: &str) -> Result<Vec<BusinessUnit>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::Spreadsheet(format!("{} has no sheets", path.display())))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (index, row) in range.rows().enumerate().skip(1) {
        let unit = cell_text(row.get(BU_COLUMN));
        let account = cell_text(row.get(ACCOUNT_COLUMN));
        match (unit, account) {
            (Some(unit), Some(account)) => {
                let name = format!("{prefix}{}", normalize_name(&unit));
                groups.entry(name).or_default().insert(account);
            }
            _ => warn!("roster row {}: missing unit or account, skipped", index + 1),
        }
    }

    Ok(groups
        .into_iter()
        .map(|(name, account_ids)| BusinessUnit {
            name,
            account_ids: account_ids.into_iter().collect(),
        })
        .collect())
}

/// Split roster accounts into onboarded and unknown.
///
/// Accounts absent from the tenant's onboarded set are dropped from
/// every unit and reported back so they can be written to the rejected
/// list. Units left empty after filtering are removed.
pub fn filter_onboarded(
    units: Vec<BusinessUnit>,
    onboarded: &[CloudAccount],
) -> (Vec<BusinessUnit>, Vec<String>) {
    let known: BTreeSet<&str> = onboarded
        .iter()
        .filter_map(|account| account.account_id.as_deref())
        .collect();

    let mut rejected = BTreeSet::new();
    let mut kept = Vec::new();
    for mut unit in units {
        unit.account_ids.retain(|id| {
            let ok = known.contains(id.as_str());
            if !ok {
                rejected.insert(id.clone());
            }
            ok
        });
        if !unit.account_ids.is_empty() {
            kept.push(unit);
        }
    }
    (kept, rejected.into_iter().collect())
}

/// Write rejected account ids to a report file, one per line.
pub fn write_rejected_report(path: &Path, rejected: &[String]) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    for id in rejected {
        writeln!(file, "{id}")?;
    }
    Ok(())
}

/// One reconciliation step against an existing collection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No collection by this name exists.
    Create(BusinessUnit),
    /// A collection by this name exists; `key` is the update key on the
    /// chosen surface (collection id for CSPM, name for CWP).
    Update { key: String, unit: BusinessUnit },
}

impl Action {
    pub fn name(&self) -> &str {
        match self {
            Action::Create(unit) => &unit.name,
            Action::Update { unit, .. } => &unit.name,
        }
    }
}

/// Plan the convergence of desired units onto existing CSPM collections.
pub fn plan_cspm(desired: &[BusinessUnit], existing: &[CspmCollection]) -> Vec<Action> {
    let by_name: BTreeMap<&str, &CspmCollection> = existing
        .iter()
        .map(|collection| (collection.name.as_str(), collection))
        .collect();

    desired
        .iter()
        .map(|unit| match by_name.get(unit.name.as_str()) {
            Some(collection) => match &collection.id {
                Some(id) => Action::Update {
                    key: id.clone(),
                    unit: unit.clone(),
                },
                // A listed collection without an id cannot be addressed
                // for update; recreate under the same name.
                None => Action::Create(unit.clone()),
            },
            None => Action::Create(unit.clone()),
        })
        .collect()
}

/// Plan the convergence of desired units onto existing CWP collections.
pub fn plan_cwp(desired: &[BusinessUnit], existing: &[CwpCollection]) -> Vec<Action> {
    let names: BTreeSet<&str> = existing
        .iter()
        .map(|collection| collection.name.as_str())
        .collect();

    desired
        .iter()
        .map(|unit| {
            if names.contains(unit.name.as_str()) {
                Action::Update {
                    key: unit.name.clone(),
                    unit: unit.clone(),
                }
            } else {
                Action::Create(unit.clone())
            }
        })
        .collect()
}

/// Tally of applied actions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    pub created: usize,
    pub updated: usize,
}

/// Apply a plan against the chosen surface, sequentially and in order.
pub async fn apply<C: CollectionApi + Sync>(
    client: &C,
    target: Target,
    plan: &[Action],
) -> Result<ApplyStats> {
    let mut stats = ApplyStats::default();
    for action in plan {
        match (target, action) {
            (Target::Cspm, Action::Create(unit)) => {
                info!("creating CSPM collection {}", unit.name);
                let spec = CspmCollectionSpec::new(&unit.name, unit.account_ids.clone());
                client.create_cspm_collection(&spec).await?;
                stats.created += 1;
            }
            (Target::Cspm, Action::Update { key, unit }) => {
                info!("updating CSPM collection {}", unit.name);
                let spec = CspmCollectionSpec::new(&unit.name, unit.account_ids.clone());
                client.update_cspm_collection(key, &spec).await?;
                stats.updated += 1;
            }
            (Target::Cwp, Action::Create(unit)) => {
                info!("creating CWP collection {}", unit.name);
                let spec = CwpCollectionSpec::new(&unit.name, unit.account_ids.clone());
                client.create_cwp_collection(&spec).await?;
                stats.created += 1;
            }
            (Target::Cwp, Action::Update { key, unit }) => {
                info!("updating CWP collection {}", unit.name);
                let spec = CwpCollectionSpec::new(&unit.name, unit.account_ids.clone());
                client.update_cwp_collection(key, &spec).await?;
                stats.updated += 1;
            }
        }
    }
    Ok(stats)
}
