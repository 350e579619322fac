//! Per-subnet record expansion.
//!
//! Every allocated subnet becomes a fixed sequence of records: the network
//! address, then either one availability record for the host range or the
//! named assignments followed by the unused gaps between them, and finally the
//! broadcast address when the subnet has one.

use std::collections::BTreeSet;

use crate::config::IpAssignment;
use crate::record::{BlockOwner, Label, OutputRecord};

use super::allocator::AllocatedSubnet;
use super::partition::available;
use super::PlanError;

/// How a subnet treats its first and last addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetKind {
    /// /30 and larger: network and broadcast are reserved
    Standard,
    /// /31 point-to-point link, both addresses usable
    PointToPoint,
    /// /32 single host route
    HostRoute,
}

impl SubnetKind {
    pub fn of(prefix: u8) -> Self {
        match prefix {
            32 => SubnetKind::HostRoute,
            31 => SubnetKind::PointToPoint,
            _ => SubnetKind::Standard,
        }
    }

    /// Inclusive usable host range of the block `base..=last`
    pub fn host_range(self, base: u32, last: u32) -> (u32, u32) {
        match self {
            SubnetKind::Standard => (base + 1, last - 1),
            SubnetKind::PointToPoint | SubnetKind::HostRoute => (base, last),
        }
    }

    pub fn broadcast(self, last: u32) -> Option<u32> {
        match self {
            SubnetKind::Standard => Some(last),
            SubnetKind::PointToPoint | SubnetKind::HostRoute => None,
        }
    }

    /// Resolve a relative position to an address inside `base..=last`
    ///
    /// Non-negative positions are offsets from the network address. Negative
    /// positions count down from the broadcast on a standard subnet and from
    /// one past the end on a /31, so `-1` is the last usable host on both. A
    /// /32 accepts 0, 1 and -1, all meaning its single address.
    pub fn resolve_position(self, base: u32, last: u32, position: i64) -> Option<u32> {
        let (low, high) = (i64::from(base), i64::from(last));
        let candidate = match self {
            SubnetKind::HostRoute => return (-1..=1).contains(&position).then_some(base),
            SubnetKind::Standard if position < 0 => high + position,
            SubnetKind::PointToPoint if position < 0 => high + 1 + position,
            SubnetKind::Standard | SubnetKind::PointToPoint => low + position,
        };

        (low..=high)
            .contains(&candidate)
            .then_some(candidate as u32)
    }
}

/// Records describing one allocated subnet, in emission order
pub fn expand(subnet: &AllocatedSubnet) -> Result<Vec<OutputRecord>, PlanError> {
    let kind = SubnetKind::of(subnet.prefix);
    let (base, last) = (subnet.base, subnet.last());
    let (first_host, last_host) = kind.host_range(base, last);

    let owner = BlockOwner {
        cidr: subnet.cidr(),
        name: Some(subnet.request.name.clone()),
        vlan: subnet.request.vlan,
        prefix: subnet.prefix,
    };

    let mut records = vec![owner.single(Label::Network, base)];

    if subnet.request.ip_assignments.is_empty() {
        records.push(available(&owner, first_host, last_host));
    } else {
        let mut assignments: Vec<&IpAssignment> = subnet.request.ip_assignments.iter().collect();
        assignments.sort_by_key(|assignment| assignment.position);

        let mut used = BTreeSet::new();
        for assignment in assignments {
            let address = kind
                .resolve_position(base, last, assignment.position)
                .ok_or_else(|| PlanError::AssignmentOutOfRange {
                    subnet: subnet.request.name.clone(),
                    name: assignment.name.clone(),
                    position: assignment.position,
                    cidr: subnet.cidr(),
                })?;

            if !used.insert(address) {
                log::warn!(
                    "Subnet {}: assignment {} shares its address with another assignment",
                    subnet.request.name,
                    assignment.name
                );
            }
            records.push(owner.single(Label::Assignment(assignment.name.clone()), address));
        }

        records.extend(
            unused_runs(first_host, last_host, &used)
                .into_iter()
                .map(|(first, last)| {
                    if first == last {
                        owner.single(Label::Unused, first)
                    } else {
                        owner.range(Label::UnusedRange, first, last)
                    }
                }),
        );
    }

    if let Some(broadcast) = kind.broadcast(last) {
        records.push(owner.single(Label::Broadcast, broadcast));
    }

    Ok(records)
}

/// Maximal runs of `first..=last` not present in `used`
fn unused_runs(first: u32, last: u32, used: &BTreeSet<u32>) -> Vec<(u32, u32)> {
    let mut runs = Vec::new();
    let mut next = u64::from(first);

    for &address in used.range(first..=last) {
        if u64::from(address) > next {
            runs.push((next as u32, address - 1));
        }
        next = u64::from(address) + 1;
    }
    if next <= u64::from(last) {
        runs.push((next as u32, last));
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubnetRequest;
    use crate::ip::arithmetic::{from_int, to_int};
    use crate::record::Category;

    fn ip(s: &str) -> u32 {
        to_int(s).unwrap()
    }

    fn subnet(request: SubnetRequest, base: &str, prefix: u8) -> AllocatedSubnet {
        AllocatedSubnet {
            request,
            base: ip(base),
            prefix,
        }
    }

    fn rows(expected: &[(&str, &str, u64)]) -> Vec<(String, String, u64)> {
        expected
            .iter()
            .map(|(label, ip, count)| (label.to_string(), ip.to_string(), *count))
            .collect()
    }

    fn summary(records: &[OutputRecord]) -> Vec<(String, String, u64)> {
        records
            .iter()
            .map(|r| (r.label.to_string(), r.ip.clone(), r.total_ips))
            .collect()
    }

    #[test]
    fn test_plain_subnet() {
        let s = subnet(SubnetRequest::with_hosts("Users", 50).vlan(102), "192.168.1.0", 26);
        let records = expand(&s).unwrap();
        assert_eq!(
            summary(&records),
            rows(&[
                ("Network", "192.168.1.0", 1),
                ("Available Range", "192.168.1.1-192.168.1.62", 62),
                ("Broadcast", "192.168.1.63", 1),
            ])
        );
        assert!(records.iter().all(|r| r.vlan == Some(102) && r.prefix == 26));
        assert!(records.iter().all(|r| r.subnet == "192.168.1.0/26"));
    }

    #[test]
    fn test_assignments_and_gaps() {
        let request = SubnetRequest::with_prefix("Mgmt", 28)
            .assign("Server2", 11)
            .assign("Gateway", 1)
            .assign("Server1", 10);
        let records = expand(&subnet(request, "192.168.1.0", 28)).unwrap();
        assert_eq!(
            summary(&records),
            rows(&[
                ("Network", "192.168.1.0", 1),
                ("Assignment:Gateway", "192.168.1.1", 1),
                ("Assignment:Server1", "192.168.1.10", 1),
                ("Assignment:Server2", "192.168.1.11", 1),
                ("Unused Range", "192.168.1.2-192.168.1.9", 8),
                ("Unused Range", "192.168.1.12-192.168.1.14", 3),
                ("Broadcast", "192.168.1.15", 1),
            ])
        );
        assert_eq!(records[1].category, Category::Assignment);
        assert_eq!(records[4].category, Category::Unused);
    }

    #[test]
    fn test_negative_position() {
        let request = SubnetRequest::with_prefix("Storage", 26).assign("Witness", -4);
        let records = expand(&subnet(request, "10.60.48.128", 26)).unwrap();
        assert_eq!(records[1].ip, "10.60.48.187");
    }

    #[test]
    fn test_singleton_gap_is_unused() {
        let request = SubnetRequest::with_prefix("Link", 30).assign("a", 2);
        let records = expand(&subnet(request, "10.0.0.0", 30)).unwrap();
        assert_eq!(
            summary(&records),
            rows(&[
                ("Network", "10.0.0.0", 1),
                ("Assignment:a", "10.0.0.2", 1),
                ("Unused", "10.0.0.1", 1),
                ("Broadcast", "10.0.0.3", 1),
            ])
        );
    }

    #[test]
    fn test_point_to_point() {
        let plain = expand(&subnet(SubnetRequest::with_prefix("p2p", 31), "10.0.0.8", 31)).unwrap();
        assert_eq!(
            summary(&plain),
            rows(&[
                ("Network", "10.0.0.8", 1),
                ("Available Range", "10.0.0.8-10.0.0.9", 2),
            ])
        );

        let request = SubnetRequest::with_prefix("p2p", 31).assign("far", -1);
        let records = expand(&subnet(request, "10.0.0.8", 31)).unwrap();
        assert_eq!(
            summary(&records),
            rows(&[
                ("Network", "10.0.0.8", 1),
                ("Assignment:far", "10.0.0.9", 1),
                ("Unused", "10.0.0.8", 1),
            ])
        );
    }

    #[test]
    fn test_host_route() {
        let plain = expand(&subnet(SubnetRequest::with_prefix("lo", 32), "10.0.0.1", 32)).unwrap();
        assert_eq!(
            summary(&plain),
            rows(&[
                ("Network", "10.0.0.1", 1),
                ("Available", "10.0.0.1", 1),
            ])
        );

        for position in [0, 1] {
            let request = SubnetRequest::with_prefix("lo", 32).assign("router-id", position);
            let records = expand(&subnet(request, "10.0.0.1", 32)).unwrap();
            assert_eq!(records.len(), 2);
            assert_eq!(records[1].ip, "10.0.0.1");
        }
    }

    #[test]
    fn test_out_of_range_positions() {
        let cases = [
            (28u8, 16i64),
            (28, -16),
            (31, 2),
            (31, -3),
            (32, 2),
            (32, -2),
        ];
        for (prefix, position) in cases {
            let request = SubnetRequest::with_prefix("s", prefix).assign("x", position);
            let err = expand(&subnet(request, "10.0.0.0", prefix)).unwrap_err();
            assert!(
                matches!(err, PlanError::AssignmentOutOfRange { position: p, .. } if p == position),
                "/{} position {}",
                prefix,
                position
            );
        }
    }

    #[test]
    fn test_resolve_position_edges() {
        let (base, last) = (ip("192.168.1.0"), ip("192.168.1.15"));
        let kind = SubnetKind::Standard;
        assert_eq!(kind.resolve_position(base, last, 0), Some(base));
        assert_eq!(kind.resolve_position(base, last, 15), Some(last));
        assert_eq!(kind.resolve_position(base, last, -1).map(from_int), Some(from_int(ip("192.168.1.14"))));
        assert_eq!(kind.resolve_position(base, last, -15), Some(base));
    }

    #[test]
    fn test_unused_runs_at_top_of_space() {
        let used: BTreeSet<u32> = [u32::MAX - 2].into_iter().collect();
        assert_eq!(
            unused_runs(u32::MAX - 3, u32::MAX, &used),
            vec![(u32::MAX - 3, u32::MAX - 3), (u32::MAX - 1, u32::MAX)]
        );
        assert!(unused_runs(5, 5, &[5].into_iter().collect()).is_empty());
    }
}
