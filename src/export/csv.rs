//! CSV export with a fixed column order.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use csv::Writer;
use std::path::Path;

use crate::record::OutputRecord;

/// Column headers, in output order
pub const CSV_HEADER: [&str; 9] = [
    "Subnet", "Name", "Vlan", "Label", "IP", "TotalIPs", "Prefix", "Mask", "Category",
];

/// Render the plan as CSV text
pub fn render_csv(records: &[OutputRecord]) -> Result<String> {
    let mut writer = Writer::from_writer(vec![]);

    writer
        .write_record(CSV_HEADER)
        .wrap_err("failed to write CSV header")?;

    for record in records {
        writer
            .write_record([
                record.subnet.as_str(),
                record.name.as_deref().unwrap_or(""),
                &record.vlan.map(|v| v.to_string()).unwrap_or_default(),
                &record.label.to_string(),
                &record.ip,
                &record.total_ips.to_string(),
                &format!("/{}", record.prefix),
                &record.mask,
                &record.category.to_string(),
            ])
            .wrap_err("failed to write CSV row")?;
    }

    let data = writer.into_inner().wrap_err("failed to flush CSV writer")?;
    Ok(String::from_utf8(data)?)
}

/// Write the plan as CSV to `path`
pub fn export_csv(records: &[OutputRecord], path: &Path) -> Result<()> {
    let content = render_csv(records)?;
    super::write_output(path, &content)
}
