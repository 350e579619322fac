//! Plan exporters: JSON, CSV, Markdown and the console table.
//!
//! Every exporter takes the same ordered record list and only formats it.
//! Each one offers a `render_*` function returning the text and, for the file
//! formats, an `export_*` function that writes it to disk.

pub mod csv;
pub mod json;
pub mod markdown;
pub mod table;

pub use self::csv::{export_csv, render_csv};
pub use self::json::{export_json, render_json};
pub use self::markdown::{export_markdown, render_markdown};
pub use self::table::{print_table, render_table, PlanRow};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::fs;
use std::path::Path;

/// Write rendered output, creating missing parent directories first
pub(crate) fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("Failed to create output directory '{}'", dir.display()))?;
    }

    fs::write(path, content).wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
