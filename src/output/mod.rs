//! Output rendering for console commands

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// Render data in the requested console format.
pub trait Formattable {
    fn format(&self, format: OutputFormat) -> Result<String>;
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

/// Render and print to stdout.
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    println!("{}", data.format(format)?);
    Ok(())
}
