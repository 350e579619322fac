//! Planning entry points.
//!
//! `plan_network` turns one parent network and its subnet requests into the
//! ordered record list; `plan_networks` does the same for a batch and stops at
//! the first network that fails. Both are pure: the same input always yields
//! the same records.

use log::{debug, info};

use crate::config::NetworkConfig;
use crate::ip::{allocate, expand, parse_cidr, partition, PlanError};
use crate::record::OutputRecord;

/// Plan a single parent network
pub fn plan_network(network: &NetworkConfig) -> Result<Vec<OutputRecord>, PlanError> {
    let parent = parse_cidr(&network.network)?;
    info!(
        "Planning {} subnet(s) in {}",
        network.subnets.len(),
        parent
    );

    let allocation = allocate(parent, &network.subnets)?;

    let mut records = Vec::new();
    for subnet in &allocation.subnets {
        records.extend(expand(subnet)?);
    }

    if !allocation.leftover.is_empty() {
        let free = partition(allocation.leftover.start, allocation.leftover.end);
        debug!(
            "{} free block(s) left in {} ({} addresses)",
            free.len(),
            parent,
            allocation.leftover.end - allocation.leftover.start
        );
        records.extend(free);
    }

    Ok(records)
}

/// Plan every network in order, concatenating the records
///
/// The first failure aborts the batch and is wrapped with the offending
/// network's CIDR.
pub fn plan_networks(networks: &[NetworkConfig]) -> Result<Vec<OutputRecord>, PlanError> {
    let mut all_records = Vec::new();

    for network in networks {
        let records = plan_network(network).map_err(|source| PlanError::Network {
            network: network.network.clone(),
            source: Box::new(source),
        })?;
        all_records.extend(records);
    }

    info!(
        "Planned {} network(s), {} record(s)",
        networks.len(),
        all_records.len()
    );
    Ok(all_records)
}
