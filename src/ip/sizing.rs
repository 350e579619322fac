//! Prefix sizing for subnet requests.
//!
//! Turns a host count into the smallest block that holds it, or checks an
//! explicit prefix length against the parent network.

use crate::config::SubnetRequest;

use super::PlanError;

/// Most specific prefix a host count can produce; /31 and /32 are explicit only
const MAX_DERIVED_PREFIX: i64 = 30;
const MIN_DERIVED_PREFIX: i64 = 1;

/// Smallest prefix whose block holds `hosts` plus network and broadcast
///
/// The result is clamped to /1../30.
///
/// # Examples
/// ```
/// use subnet_planner::ip::sizing::prefix_for_hosts;
///
/// assert_eq!(prefix_for_hosts(50), 26);
/// assert_eq!(prefix_for_hosts(254), 24);
/// assert_eq!(prefix_for_hosts(1), 30);
/// ```
pub fn prefix_for_hosts(hosts: u64) -> u8 {
    let required = hosts.saturating_add(2);
    // ceil(log2(required)) for required >= 2
    let bits = 64 - (required - 1).leading_zeros();
    let prefix = (32 - i64::from(bits)).clamp(MIN_DERIVED_PREFIX, MAX_DERIVED_PREFIX);
    prefix as u8
}

/// Resolve the prefix length a request will be allocated with
///
/// An explicit prefix takes precedence over a host count. Zero values are
/// treated as "not given".
pub fn resolve_prefix(request: &SubnetRequest, parent_prefix: u8) -> Result<u8, PlanError> {
    if let Some(prefix) = request.prefix.filter(|p| *p > 0) {
        if prefix < parent_prefix || prefix > 32 {
            return Err(PlanError::InvalidPrefix {
                name: request.name.clone(),
                prefix,
                parent_prefix,
            });
        }
        return Ok(prefix);
    }

    let hosts = request
        .hosts
        .filter(|h| *h > 0)
        .ok_or_else(|| PlanError::MissingSize {
            name: request.name.clone(),
        })?;

    let prefix = prefix_for_hosts(hosts);
    if prefix < parent_prefix {
        return Err(PlanError::HostsExceedParent {
            name: request.name.clone(),
            hosts,
            prefix,
            parent_prefix,
        });
    }

    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_for_hosts() {
        let cases = [
            (5, 29),
            (30, 27),
            (50, 26),
            (62, 26),
            (63, 25),
            (100, 25),
            (500, 23),
            (1000, 22),
            (1, 30),
            (2, 30),
            (254, 24),
            (255, 23),
        ];
        for (hosts, expected) in cases {
            assert_eq!(prefix_for_hosts(hosts), expected, "hosts = {}", hosts);
        }
    }

    #[test]
    fn test_prefix_for_hosts_clamps() {
        assert_eq!(prefix_for_hosts(u64::MAX), 1);
        assert_eq!(prefix_for_hosts(1 << 40), 1);
    }

    #[test]
    fn test_prefix_for_hosts_is_monotonic() {
        let mut previous = prefix_for_hosts(1);
        for hosts in 2..5000 {
            let prefix = prefix_for_hosts(hosts);
            assert!(prefix <= previous, "hosts {} gave /{} after /{}", hosts, prefix, previous);
            previous = prefix;
        }
    }

    #[test]
    fn test_explicit_prefix_wins() {
        let mut request = SubnetRequest::with_hosts("Mixed", 500);
        request.prefix = Some(28);
        assert_eq!(resolve_prefix(&request, 24), Ok(28));
    }

    #[test]
    fn test_zero_values_count_as_missing() {
        let mut request = SubnetRequest::with_prefix("Zero", 0);
        request.hosts = Some(0);
        assert_eq!(
            resolve_prefix(&request, 24),
            Err(PlanError::MissingSize { name: "Zero".to_string() })
        );
    }

    #[test]
    fn test_prefix_less_specific_than_parent() {
        let request = SubnetRequest::with_prefix("Wide", 16);
        assert!(matches!(
            resolve_prefix(&request, 24),
            Err(PlanError::InvalidPrefix { prefix: 16, parent_prefix: 24, .. })
        ));
    }

    #[test]
    fn test_prefix_beyond_32() {
        let request = SubnetRequest::with_prefix("Bogus", 33);
        assert!(matches!(resolve_prefix(&request, 24), Err(PlanError::InvalidPrefix { .. })));
    }

    #[test]
    fn test_hosts_exceed_parent() {
        let request = SubnetRequest::with_hosts("Big", 10);
        let err = resolve_prefix(&request, 29).unwrap_err();
        assert!(matches!(err, PlanError::HostsExceedParent { prefix: 28, .. }));
        assert!(err.to_string().contains("exceeds the capacity"));
    }

    #[test]
    fn test_point_to_point_only_by_explicit_prefix() {
        assert_eq!(resolve_prefix(&SubnetRequest::with_prefix("p2p", 31), 24), Ok(31));
        assert_eq!(resolve_prefix(&SubnetRequest::with_prefix("loop", 32), 24), Ok(32));
        assert_eq!(resolve_prefix(&SubnetRequest::with_hosts("tiny", 1), 24), Ok(30));
    }
}
