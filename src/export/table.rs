//! Console rendering of a plan.

use std::io::{self, Write};

use tabled::{settings::Style, Table, Tabled};

use crate::record::OutputRecord;

/// One display row, shared by the console and Markdown renderers
#[derive(Debug, Clone, Tabled)]
pub struct PlanRow {
    #[tabled(rename = "Subnet")]
    pub subnet: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "VLAN")]
    pub vlan: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "IP")]
    pub ip: String,
    #[tabled(rename = "Total IPs")]
    pub total_ips: u64,
    #[tabled(rename = "Prefix")]
    pub prefix: String,
    #[tabled(rename = "Mask")]
    pub mask: String,
    #[tabled(rename = "Category")]
    pub category: String,
}

impl From<&OutputRecord> for PlanRow {
    fn from(record: &OutputRecord) -> Self {
        PlanRow {
            subnet: record.subnet.clone(),
            name: record.name.clone().unwrap_or_default(),
            vlan: record.vlan.map(|v| v.to_string()).unwrap_or_default(),
            label: record.label.to_string(),
            ip: record.ip.clone(),
            total_ips: record.total_ips,
            prefix: format!("/{}", record.prefix),
            mask: record.mask.clone(),
            category: record.category.to_string(),
        }
    }
}

pub(crate) fn rows(records: &[OutputRecord]) -> Vec<PlanRow> {
    records.iter().map(PlanRow::from).collect()
}

/// Render the plan as a console table
pub fn render_table(records: &[OutputRecord]) -> String {
    Table::new(rows(records)).with(Style::rounded()).to_string()
}

/// Print the plan table to stdout
pub fn print_table(records: &[OutputRecord]) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", render_table(records));
}
