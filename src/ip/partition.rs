//! Leftover space partitioning.
//!
//! Splits an arbitrary address range into the fewest maximal power-of-two
//! blocks that are aligned to their own size, the same way a buddy allocator
//! finds its largest free blocks.

use crate::record::{BlockOwner, Label, OutputRecord};

use super::arithmetic::format_cidr;

/// A free block found by [`aligned_blocks`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeBlock {
    pub base: u64,
    pub prefix: u8,
}

impl FreeBlock {
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }
}

/// Decompose `[start, end)` into maximal aligned blocks, left to right
pub fn aligned_blocks(start: u64, end: u64) -> Vec<FreeBlock> {
    let mut blocks = Vec::new();
    let mut cursor = start;

    while cursor < end {
        let remaining = end - cursor;
        let mut size = 1u64;
        while size * 2 <= remaining && cursor % (size * 2) == 0 {
            size *= 2;
        }

        let prefix = (32 - size.trailing_zeros()) as u8;
        blocks.push(FreeBlock { base: cursor, prefix });
        cursor += size;
    }

    blocks
}

/// Records for the unclaimed range `[start, end)` of a parent network
///
/// Blocks of /30 and larger show only their usable hosts; /31 and /32 blocks
/// show every address since there is no broadcast to exclude.
pub fn partition(start: u64, end: u64) -> Vec<OutputRecord> {
    aligned_blocks(start, end)
        .into_iter()
        .map(|block| {
            // blocks never extend past 2^32
            let base = block.base as u32;
            let last = (block.base + block.size() - 1) as u32;
            log::debug!("Free block {}", format_cidr(base, block.prefix));

            let owner = BlockOwner {
                cidr: format_cidr(base, block.prefix),
                name: None,
                vlan: None,
                prefix: block.prefix,
            };

            if block.prefix < 31 {
                available(&owner, base + 1, last - 1)
            } else {
                available(&owner, base, last)
            }
        })
        .collect()
}

/// `Available` for one address, `Available Range` otherwise
pub(crate) fn available(owner: &BlockOwner, first: u32, last: u32) -> OutputRecord {
    if first == last {
        owner.single(Label::Available, first)
    } else {
        owner.range(Label::AvailableRange, first, last)
    }
}
