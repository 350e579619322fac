//! Output records produced by a planning run.
//!
//! A plan is a flat, ordered list of [`OutputRecord`]s. Every exporter renders
//! the same list; none of them compute anything beyond formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ip::arithmetic::{format_range, from_int, mask_for};

/// What a record describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Label {
    Network,
    Broadcast,
    /// A named address, carries the assignment name
    Assignment(String),
    Unused,
    UnusedRange,
    Available,
    AvailableRange,
}

impl Label {
    pub fn category(&self) -> Category {
        match self {
            Label::Network => Category::Network,
            Label::Broadcast => Category::Broadcast,
            Label::Assignment(_) => Category::Assignment,
            Label::Unused | Label::UnusedRange => Category::Unused,
            Label::Available | Label::AvailableRange => Category::Available,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Network => f.write_str("Network"),
            Label::Broadcast => f.write_str("Broadcast"),
            Label::Assignment(name) => write!(f, "Assignment:{}", name),
            Label::Unused => f.write_str("Unused"),
            Label::UnusedRange => f.write_str("Unused Range"),
            Label::Available => f.write_str("Available"),
            Label::AvailableRange => f.write_str("Available Range"),
        }
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for Label {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Network" => Ok(Label::Network),
            "Broadcast" => Ok(Label::Broadcast),
            "Unused" => Ok(Label::Unused),
            "Unused Range" => Ok(Label::UnusedRange),
            "Available" => Ok(Label::Available),
            "Available Range" => Ok(Label::AvailableRange),
            other => other
                .strip_prefix("Assignment:")
                .map(|name| Label::Assignment(name.to_string()))
                .ok_or_else(|| format!("unknown record label '{}'", other)),
        }
    }
}

/// Coarse grouping of labels, used by exporters and filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Network,
    Broadcast,
    Assignment,
    Unused,
    Available,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Category::Network => "Network",
            Category::Broadcast => "Broadcast",
            Category::Assignment => "Assignment",
            Category::Unused => "Unused",
            Category::Available => "Available",
        };
        f.write_str(text)
    }
}

/// One row of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    /// CIDR of the block the record belongs to
    pub subnet: String,
    /// Owning subnet name, `None` for space outside every subnet
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vlan: Option<u32>,
    pub label: Label,
    /// Single address or inclusive `first-last` range
    pub ip: String,
    #[serde(rename = "totalIPs")]
    pub total_ips: u64,
    pub prefix: u8,
    pub mask: String,
    pub category: Category,
}

impl OutputRecord {
    pub fn is_range(&self) -> bool {
        self.ip.contains('-')
    }
}

/// The block a group of records belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOwner {
    pub cidr: String,
    pub name: Option<String>,
    pub vlan: Option<u32>,
    pub prefix: u8,
}

impl BlockOwner {
    /// Record for a single address
    pub fn single(&self, label: Label, address: u32) -> OutputRecord {
        self.record(label, from_int(address).to_string(), 1)
    }

    /// Record for the inclusive range `first..=last`
    pub fn range(&self, label: Label, first: u32, last: u32) -> OutputRecord {
        let count = u64::from(last) - u64::from(first) + 1;
        self.record(label, format_range(first, last), count)
    }

    fn record(&self, label: Label, ip: String, total_ips: u64) -> OutputRecord {
        OutputRecord {
            subnet: self.cidr.clone(),
            name: self.name.clone(),
            vlan: self.vlan,
            category: label.category(),
            label,
            ip,
            total_ips,
            prefix: self.prefix,
            mask: mask_for(self.prefix).to_string(),
        }
    }
}
