//! Export rows and projectors
//!
//! Projectors turn wire records into fixed-width rows for the sinks.
//! They are total: a sparse record projects with placeholders, never an
//! error. Filtering (version bands) and expansion (instance x finding
//! cross-products) happen here so the pipeline loop stays generic.

use crate::client::models::{Defender, DiscoveryEntity, Image};
use crate::pipeline::Project;
use crate::sink::TabularRow;

const PLACEHOLDER: &str = "N/A";

fn cell(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Agent version relative to the console release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBand {
    /// Same major version as the console.
    Current,
    /// One major version behind.
    Previous,
    /// More than one behind, or unparsable.
    Outdated,
}

impl VersionBand {
    /// Classify an agent's major version against the console's.
    pub fn classify(agent_major: Option<u32>, console_major: u32) -> Self {
        match agent_major {
            Some(major) if major >= console_major => Self::Current,
            Some(major) if major + 1 == console_major => Self::Previous,
            _ => Self::Outdated,
        }
    }

    /// Sheet name for this band.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Previous => "last",
            Self::Outdated => "outdated",
        }
    }
}

/// One defender agent in the version report.
#[derive(Debug, Clone)]
pub struct DefenderRow {
    pub hostname: String,
    pub version: String,
    pub category: String,
    pub cluster: String,
    pub provider: String,
    pub account_id: String,
    pub region: String,
    pub last_modified: String,
}

impl TabularRow for DefenderRow {
    const HEADERS: &'static [&'static str] = &[
        "Hostname",
        "Version",
        "Category",
        "Cluster",
        "Provider",
        "Account ID",
        "Region",
        "Last Modified",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.hostname.clone(),
            self.version.clone(),
            self.category.clone(),
            self.cluster.clone(),
            self.provider.clone(),
            self.account_id.clone(),
            self.region.clone(),
            self.last_modified.clone(),
        ]
    }
}

impl From<&Defender> for DefenderRow {
    fn from(defender: &Defender) -> Self {
        let meta = defender.cloud_metadata.as_ref();
        Self {
            hostname: cell(&defender.hostname),
            version: cell(&defender.version),
            category: cell(&defender.category),
            cluster: cell(&defender.cluster),
            provider: meta.map_or_else(|| PLACEHOLDER.to_string(), |m| cell(&m.provider)),
            account_id: meta.map_or_else(|| PLACEHOLDER.to_string(), |m| cell(&m.account_id)),
            region: meta.map_or_else(|| PLACEHOLDER.to_string(), |m| cell(&m.region)),
            last_modified: cell(&defender.last_modified),
        }
    }
}

/// Projects defenders in one version band; other bands yield nothing.
pub struct DefenderProjector {
    pub band: VersionBand,
    pub console_major: u32,
}

impl Project for DefenderProjector {
    type Record = Defender;
    type Row = DefenderRow;

    fn rows(&self, record: &Defender) -> Vec<DefenderRow> {
        if VersionBand::classify(record.major_version(), self.console_major) == self.band {
            vec![DefenderRow::from(record)]
        } else {
            Vec::new()
        }
    }
}

/// One undefended cloud resource.
#[derive(Debug, Clone)]
pub struct UndefendedRow {
    pub name: String,
    pub arn: String,
    pub account_id: String,
    pub region: String,
    pub service_type: String,
}

impl TabularRow for UndefendedRow {
    const HEADERS: &'static [&'static str] =
        &["Name", "ARN", "Account ID", "Region", "Service Type"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.arn.clone(),
            self.account_id.clone(),
            self.region.clone(),
            self.service_type.clone(),
        ]
    }
}

impl From<&DiscoveryEntity> for UndefendedRow {
    fn from(entity: &DiscoveryEntity) -> Self {
        Self {
            name: cell(&entity.name),
            arn: cell(&entity.arn),
            account_id: cell(&entity.account_id),
            region: cell(&entity.region),
            service_type: cell(&entity.service_type),
        }
    }
}

/// One-to-one projection of discovery entities.
pub struct UndefendedProjector;

impl Project for UndefendedProjector {
    type Record = DiscoveryEntity;
    type Row = UndefendedRow;

    fn rows(&self, record: &DiscoveryEntity) -> Vec<UndefendedRow> {
        vec![UndefendedRow::from(record)]
    }
}

/// One (deployment, finding) pair for the image vulnerability CSV.
#[derive(Debug, Clone)]
pub struct ImageVulnRow {
    pub image: String,
    pub host: String,
    pub cve: String,
    pub severity: String,
    pub cvss: String,
    pub package: String,
    pub package_version: String,
    pub fix_status: String,
}

impl TabularRow for ImageVulnRow {
    const HEADERS: &'static [&'static str] = &[
        "Image",
        "Host",
        "CVE",
        "Severity",
        "CVSS",
        "Package",
        "Package Version",
        "Fix Status",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.image.clone(),
            self.host.clone(),
            self.cve.clone(),
            self.severity.clone(),
            self.cvss.clone(),
            self.package.clone(),
            self.package_version.clone(),
            self.fix_status.clone(),
        ]
    }
}

/// Expands each image into its instance x vulnerability cross-product.
///
/// An image with no vulnerabilities projects to nothing. An image with
/// no recorded instances still reports each finding once, attributed to
/// the repo tag with a placeholder host.
pub struct ImageVulnProjector;

impl Project for ImageVulnProjector {
    type Record = Image;
    type Row = ImageVulnRow;

    fn rows(&self, record: &Image) -> Vec<ImageVulnRow> {
        if record.vulnerabilities.is_empty() {
            return Vec::new();
        }

        let fallback = record
            .repo_tag
            .as_ref()
            .map_or_else(|| PLACEHOLDER.to_string(), |tag| tag.display());

        let placements: Vec<(String, String)> = if record.instances.is_empty() {
            vec![(fallback, PLACEHOLDER.to_string())]
        } else {
            record
                .instances
                .iter()
                .map(|instance| {
                    let image = match instance.image.as_deref() {
                        Some(name) if !name.is_empty() => name.to_string(),
                        _ => fallback.clone(),
                    };
                    (image, cell(&instance.host))
                })
                .collect()
        };

        let mut rows = Vec::with_capacity(placements.len() * record.vulnerabilities.len());
        for (image, host) in &placements {
            for vuln in &record.vulnerabilities {
                rows.push(ImageVulnRow {
                    image: image.clone(),
                    host: host.clone(),
                    cve: cell(&vuln.cve),
                    severity: cell(&vuln.severity),
                    cvss: vuln
                        .cvss
                        .map_or_else(|| PLACEHOLDER.to_string(), |score| format!("{score:.1}")),
                    package: cell(&vuln.package_name),
                    package_version: cell(&vuln.package_version),
                    fix_status: cell(&vuln.status),
                });
            }
        }
        rows
    }
}
