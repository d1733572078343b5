//! Common CLI types shared across commands

use crate::reconcile::Target;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// Which API surface a collection command addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Surface {
    /// Posture management (CSPM) collections
    Cspm,
    /// Workload protection (CWP) console collections
    Cwp,
}

impl Surface {
    pub fn target(self) -> Target {
        match self {
            Surface::Cspm => Target::Cspm,
            Surface::Cwp => Target::Cwp,
        }
    }

    /// Collection name prefix conventionally used on this surface.
    pub fn default_prefix(self) -> &'static str {
        match self {
            Surface::Cspm => "FinOps_",
            Surface::Cwp => "Automation_",
        }
    }
}
