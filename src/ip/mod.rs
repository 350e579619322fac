//! IPv4 address planning module.
//!
//! This module holds everything that works on raw addresses: dotted-quad
//! arithmetic, prefix sizing, subnet placement inside a parent block, the
//! per-subnet record expansion and the partitioning of leftover space.

pub mod allocator;
pub mod arithmetic;
pub mod expander;
pub mod partition;
pub mod sizing;

// Re-export commonly used types
pub use allocator::{allocate, AllocatedSubnet, Allocation};
pub use arithmetic::{from_int, mask_for, parse_cidr, to_int, ParentBlock};
pub use expander::{expand, SubnetKind};
pub use partition::{aligned_blocks, partition, FreeBlock};
pub use sizing::{prefix_for_hosts, resolve_prefix};

/// Errors raised while planning a parent network
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("missing 'network' field - each network must specify a CIDR (e.g., \"network\": \"10.0.0.0/24\")")]
    MissingNetwork,

    #[error("invalid network CIDR '{cidr}': {reason}")]
    InvalidCidr { cidr: String, reason: String },

    #[error("subnet {name} must specify either 'hosts' or 'cidr'")]
    MissingSize { name: String },

    #[error("subnet {name}: prefix /{prefix} is invalid for parent network /{parent_prefix}")]
    InvalidPrefix {
        name: String,
        prefix: u8,
        parent_prefix: u8,
    },

    #[error("subnet {name}: {hosts} hosts need a /{prefix}, which exceeds the capacity of parent network /{parent_prefix}")]
    HostsExceedParent {
        name: String,
        hosts: u64,
        prefix: u8,
        parent_prefix: u8,
    },

    #[error("requested subnets exceed parent capacity: {requested} addresses requested, {available} available")]
    CapacityExceeded { requested: u64, available: u64 },

    #[error("subnet {subnet}: assignment {name} position {position} is out of range for {cidr}")]
    AssignmentOutOfRange {
        subnet: String,
        name: String,
        position: i64,
        cidr: String,
    },

    #[error("error planning network {network}: {source}")]
    Network {
        network: String,
        #[source]
        source: Box<PlanError>,
    },
}
