//! Markdown export.

use color_eyre::Result;
use std::path::Path;

use tabled::{settings::Style, Table};

use super::table::rows;
use crate::record::OutputRecord;

/// Render the plan as a Markdown document with a single table
pub fn render_markdown(records: &[OutputRecord]) -> String {
    let table = Table::new(rows(records)).with(Style::markdown()).to_string();
    format!("# Subnet Plan\n\n{}\n", table)
}

/// Write the plan as Markdown to `path`
pub fn export_markdown(records: &[OutputRecord], path: &Path) -> Result<()> {
    super::write_output(path, &render_markdown(records))
}
