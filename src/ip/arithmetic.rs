//! IPv4 address arithmetic.
//!
//! Addresses are handled as `u32` values for every calculation and only
//! turned back into dotted quads for display. Range ends are carried as `u64`
//! so that a `/0` block (which ends at 2^32) needs no special casing.

use std::fmt;
use std::net::{AddrParseError, Ipv4Addr};

use super::PlanError;

/// A normalized CIDR block: base address with every host bit cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParentBlock {
    pub base: u32,
    pub prefix: u8,
}

impl ParentBlock {
    /// Build a block from any address inside it; host bits are masked off
    pub fn new(address: u32, prefix: u8) -> Self {
        ParentBlock {
            base: address & mask_bits(prefix),
            prefix,
        }
    }

    /// Number of addresses covered by the block
    pub fn size(&self) -> u64 {
        block_size(self.prefix)
    }

    /// One past the last address of the block
    pub fn end(&self) -> u64 {
        u64::from(self.base) + self.size()
    }
}

impl fmt::Display for ParentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", from_int(self.base), self.prefix)
    }
}

/// Convert a dotted-quad IPv4 literal to its integer value
pub fn to_int(address: &str) -> Result<u32, AddrParseError> {
    address.trim().parse::<Ipv4Addr>().map(u32::from)
}

/// Convert an integer back to an IPv4 address
pub fn from_int(n: u32) -> Ipv4Addr {
    Ipv4Addr::from(n)
}

/// Netmask for a prefix length as a 4-byte address
///
/// Prefixes above 32 are treated as 32.
pub fn mask_for(prefix: u8) -> Ipv4Addr {
    Ipv4Addr::from(mask_bits(prefix))
}

/// Netmask for a prefix length as a raw integer
pub fn mask_bits(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p if p >= 32 => u32::MAX,
        p => u32::MAX << (32 - u32::from(p)),
    }
}

/// Number of addresses in a block of the given prefix length
pub fn block_size(prefix: u8) -> u64 {
    1u64 << (32 - u32::from(prefix.min(32)))
}

/// Render `base/prefix`
pub fn format_cidr(base: u32, prefix: u8) -> String {
    format!("{}/{}", from_int(base), prefix)
}

/// Render an inclusive address range, collapsing a single address
pub fn format_range(first: u32, last: u32) -> String {
    if first == last {
        from_int(first).to_string()
    } else {
        format!("{}-{}", from_int(first), from_int(last))
    }
}

/// Parse a CIDR literal such as `192.168.1.0/24` into a normalized block
///
/// A literal with host bits set (`192.168.1.77/24`) is accepted and masked
/// down to its network address.
pub fn parse_cidr(cidr: &str) -> Result<ParentBlock, PlanError> {
    let trimmed = cidr.trim();
    if trimmed.is_empty() {
        return Err(PlanError::MissingNetwork);
    }

    let invalid = |reason: String| PlanError::InvalidCidr {
        cidr: cidr.to_string(),
        reason,
    };

    let (address, prefix) = trimmed
        .split_once('/')
        .ok_or_else(|| invalid("missing prefix length".to_string()))?;

    let address = to_int(address).map_err(|e| invalid(e.to_string()))?;
    let prefix = prefix
        .trim()
        .parse::<u8>()
        .map_err(|_| invalid(format!("invalid prefix length '{}'", prefix)))?;
    if prefix > 32 {
        return Err(invalid(format!("prefix length /{} is out of range 0-32", prefix)));
    }

    let block = ParentBlock::new(address, prefix);
    if block.base != address {
        log::warn!(
            "Network {} has host bits set, using {} instead",
            trimmed,
            block
        );
    }

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_int_known_values() {
        assert_eq!(to_int("0.0.0.0").unwrap(), 0);
        assert_eq!(to_int("192.168.1.1").unwrap(), 3232235777);
        assert_eq!(to_int("10.0.0.1").unwrap(), 167772161);
        assert_eq!(to_int("255.255.255.255").unwrap(), u32::MAX);
    }

    #[test]
    fn test_to_int_rejects_garbage() {
        for bad in ["", "256.0.0.1", "1.2.3", "1.2.3.4.5", "a.b.c.d", "::1"] {
            assert!(to_int(bad).is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_round_trip() {
        for ip in ["0.0.0.0", "10.60.48.187", "172.16.254.1", "255.255.255.255"] {
            assert_eq!(from_int(to_int(ip).unwrap()).to_string(), ip);
        }
    }

    #[test]
    fn test_mask_for() {
        assert_eq!(mask_for(0).to_string(), "0.0.0.0");
        assert_eq!(mask_for(8).to_string(), "255.0.0.0");
        assert_eq!(mask_for(26).to_string(), "255.255.255.192");
        assert_eq!(mask_for(31).to_string(), "255.255.255.254");
        assert_eq!(mask_for(32).to_string(), "255.255.255.255");
    }

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(0), 1 << 32);
        assert_eq!(block_size(24), 256);
        assert_eq!(block_size(32), 1);
    }

    #[test]
    fn test_parse_cidr_normalizes_host_bits() {
        let block = parse_cidr("192.168.1.77/24").unwrap();
        assert_eq!(block.base, to_int("192.168.1.0").unwrap());
        assert_eq!(block.prefix, 24);
        assert_eq!(block.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn test_parse_cidr_errors() {
        assert_eq!(parse_cidr("  "), Err(PlanError::MissingNetwork));
        assert!(matches!(parse_cidr("invalid-cidr"), Err(PlanError::InvalidCidr { .. })));
        assert!(matches!(parse_cidr("10.0.0.0"), Err(PlanError::InvalidCidr { .. })));
        assert!(matches!(parse_cidr("10.0.0.0/33"), Err(PlanError::InvalidCidr { .. })));
        assert!(matches!(parse_cidr("10.0.0.0/abc"), Err(PlanError::InvalidCidr { .. })));
    }

    #[test]
    fn test_parent_block_end() {
        let block = parse_cidr("0.0.0.0/0").unwrap();
        assert_eq!(block.end(), 1 << 32);
        let block = parse_cidr("10.0.0.0/30").unwrap();
        assert_eq!(block.end(), u64::from(to_int("10.0.0.4").unwrap()));
    }

    #[test]
    fn test_format_range() {
        let a = to_int("192.168.1.2").unwrap();
        let b = to_int("192.168.1.9").unwrap();
        assert_eq!(format_range(a, b), "192.168.1.2-192.168.1.9");
        assert_eq!(format_range(a, a), "192.168.1.2");
    }
}
