//! Subnet placement inside a parent block.
//!
//! Requests are sorted largest block first and laid out back to back from the
//! parent's base address. Because every block is a power of two and sizes only
//! shrink along the way, each placement lands on a boundary aligned to its own
//! size without any backtracking.

use std::ops::Range;

use crate::config::SubnetRequest;

use super::arithmetic::{block_size, format_cidr, ParentBlock};
use super::sizing::resolve_prefix;
use super::PlanError;

/// A subnet request bound to a concrete block
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedSubnet {
    pub request: SubnetRequest,
    pub base: u32,
    pub prefix: u8,
}

impl AllocatedSubnet {
    pub fn size(&self) -> u64 {
        block_size(self.prefix)
    }

    /// One past the last address
    pub fn end(&self) -> u64 {
        u64::from(self.base) + self.size()
    }

    /// Last address of the block (the broadcast for /30 and larger)
    pub fn last(&self) -> u32 {
        // size >= 1 and the block never crosses 2^32
        (self.end() - 1) as u32
    }

    pub fn cidr(&self) -> String {
        format_cidr(self.base, self.prefix)
    }

    pub fn name(&self) -> &str {
        &self.request.name
    }
}

/// Placement of every request in one parent block
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub parent: ParentBlock,
    /// Allocated subnets in ascending address order
    pub subnets: Vec<AllocatedSubnet>,
    /// Space after the last subnet that nothing claimed, `[cursor, parent end)`
    pub leftover: Range<u64>,
}

/// Place every request inside `parent`
///
/// Fails on the first request whose prefix cannot be resolved, and when the
/// blocks together need more space than the parent has.
pub fn allocate(parent: ParentBlock, requests: &[SubnetRequest]) -> Result<Allocation, PlanError> {
    let mut sized = requests
        .iter()
        .map(|request| resolve_prefix(request, parent.prefix).map(|prefix| (request, prefix)))
        .collect::<Result<Vec<_>, _>>()?;

    // Shorter prefix means larger block; sort_by_key is stable so ties keep input order
    sized.sort_by_key(|(_, prefix)| *prefix);

    let requested: u64 = sized.iter().map(|(_, prefix)| block_size(*prefix)).sum();
    if requested > parent.size() {
        return Err(PlanError::CapacityExceeded {
            requested,
            available: parent.size(),
        });
    }

    let start = u64::from(parent.base);
    let (subnets, cursor) = sized.into_iter().fold(
        (Vec::with_capacity(requests.len()), start),
        |(mut placed, cursor), (request, prefix)| {
            // cursor < parent end <= 2^32 here thanks to the capacity check
            let subnet = AllocatedSubnet {
                request: request.clone(),
                base: cursor as u32,
                prefix,
            };
            log::debug!("Placed subnet {} at {}", subnet.name(), subnet.cidr());
            let next = subnet.end();
            placed.push(subnet);
            (placed, next)
        },
    );

    Ok(Allocation {
        parent,
        subnets,
        leftover: cursor..parent.end(),
    })
}
