//! JSON export.
//!
//! Emits every record field so the file can be read back into records.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::path::Path;

use crate::record::OutputRecord;

/// Pretty-printed JSON array of records
pub fn render_json(records: &[OutputRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).wrap_err("failed to marshal JSON")
}

/// Write the plan as JSON to `path`
pub fn export_json(records: &[OutputRecord], path: &Path) -> Result<()> {
    let content = render_json(records)?;
    super::write_output(path, &content)
}
