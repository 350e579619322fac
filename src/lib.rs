//! # Subnet Planner - IPv4 subnet allocation for parent CIDR blocks
//!
//! This library packs named subnet requests into one or more parent networks,
//! places optional named addresses inside each subnet and reports the address
//! space nobody claimed.
//!
//! ## Overview
//!
//! A request asks for either a host count or an explicit prefix length. The
//! planner sizes every request, sorts them largest first and lays them out
//! back to back from the parent's base address, which keeps every subnet
//! aligned to its own size. Each subnet is then expanded into records
//! (network, assignments, unused gaps, broadcast) and the tail of the parent
//! is split into maximal aligned blocks marked as available.
//!
//! ## Architecture
//!
//! - `ip`: address arithmetic, sizing, allocation, expansion, free space
//! - `record`: the output record model shared by all exporters
//! - `config`: input data model for parent networks and subnet requests
//! - `config_loader`: JSON/YAML loading and command-line size specs
//! - `planner`: the single-network and batch planning entry points
//! - `export`: JSON, CSV, Markdown and console renderers
//!
//! ## Example Usage
//!
//! ```rust
//! use subnet_planner::config::{NetworkConfig, SubnetRequest};
//! use subnet_planner::planner::plan_network;
//!
//! let network = NetworkConfig::new(
//!     "192.168.1.0/24",
//!     vec![SubnetRequest::with_hosts("Users", 50).vlan(102)],
//! );
//!
//! let records = plan_network(&network)?;
//! assert_eq!(records[0].subnet, "192.168.1.0/26");
//! assert_eq!(records[0].ip, "192.168.1.0");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```json
//! {
//!   "network": "192.168.1.0/24",
//!   "subnets": [
//!     {"name": "Management", "vlan": 101, "hosts": 30},
//!     {"name": "Servers", "vlan": 103, "cidr": 27,
//!      "IPAssignments": [{"Name": "Gateway", "Position": 1}]}
//!   ]
//! }
//! ```
//!
//! A file may also hold an array of such objects to plan several networks.
//!
//! ## Error Handling
//!
//! Planning errors are typed ([`ip::PlanError`]); loading and exporting use
//! `color_eyre` reports with context.

pub mod config;
pub mod config_loader;
pub mod export;
pub mod ip;
pub mod planner;
pub mod record;
