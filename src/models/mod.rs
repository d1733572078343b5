//! Presentation models
//!
//! `display` holds console-facing rows for table and JSON output;
//! `report` holds the fixed-width rows and projectors that feed the
//! export pipeline's sinks.

pub mod display;
pub mod report;

pub use report::{
    DefenderProjector, DefenderRow, ImageVulnProjector, ImageVulnRow, UndefendedProjector,
    UndefendedRow, VersionBand,
};
