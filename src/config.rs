use serde::{Deserialize, Serialize};

/// Complete planning input: one or more parent networks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub networks: Vec<NetworkConfig>,
}

impl PlanConfig {
    /// Validate the structure of the configuration
    ///
    /// Address-level problems (bad CIDRs, prefixes that do not fit) are left
    /// to the planner, which reports them with the offending network.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.networks.is_empty() {
            return Err(ValidationError::InvalidNetwork(
                "at least one network must be defined".to_string(),
            ));
        }

        for network in &self.networks {
            for subnet in &network.subnets {
                if subnet.name.trim().is_empty() {
                    return Err(ValidationError::InvalidSubnet(format!(
                        "subnet in network '{}' has an empty name",
                        network.network
                    )));
                }

                if subnet.hosts.is_some_and(|h| h > 0) && subnet.prefix.is_some_and(|p| p > 0) {
                    log::warn!(
                        "Subnet {} specifies both hosts and cidr; cidr /{} takes precedence",
                        subnet.name,
                        subnet.prefix.unwrap_or_default()
                    );
                }

                for assignment in &subnet.ip_assignments {
                    if assignment.name.trim().is_empty() {
                        return Err(ValidationError::InvalidAssignment(format!(
                            "assignment at position {} in subnet '{}' has an empty name",
                            assignment.position, subnet.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// A parent network to be subdivided
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Parent block in CIDR notation, e.g. "10.0.0.0/24"
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub subnets: Vec<SubnetRequest>,
}

impl NetworkConfig {
    pub fn new(network: impl Into<String>, subnets: Vec<SubnetRequest>) -> Self {
        NetworkConfig {
            network: network.into(),
            subnets,
        }
    }
}

/// A named subnet requirement
///
/// Sized either by a host count or by an explicit prefix length; when both
/// are present the prefix wins. Zero values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubnetRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<u64>,
    /// Explicit prefix length
    #[serde(rename = "cidr", alias = "prefix", default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<u8>,
    #[serde(
        rename = "IPAssignments",
        alias = "ip_assignments",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ip_assignments: Vec<IpAssignment>,
}

impl SubnetRequest {
    /// Request sized by host count
    pub fn with_hosts(name: impl Into<String>, hosts: u64) -> Self {
        SubnetRequest {
            name: name.into(),
            hosts: Some(hosts),
            ..Default::default()
        }
    }

    /// Request sized by explicit prefix length
    pub fn with_prefix(name: impl Into<String>, prefix: u8) -> Self {
        SubnetRequest {
            name: name.into(),
            prefix: Some(prefix),
            ..Default::default()
        }
    }

    pub fn vlan(mut self, vlan: u32) -> Self {
        self.vlan = Some(vlan);
        self
    }

    pub fn assign(mut self, name: impl Into<String>, position: i64) -> Self {
        self.ip_assignments.push(IpAssignment::new(name, position));
        self
    }
}

/// A named address at a position relative to its subnet
///
/// Non-negative positions count up from the network address, negative
/// positions count down from the top of the subnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAssignment {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Position", alias = "position")]
    pub position: i64,
}

impl IpAssignment {
    pub fn new(name: impl Into<String>, position: i64) -> Self {
        IpAssignment {
            name: name.into(),
            position,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
    #[error("Invalid subnet configuration: {0}")]
    InvalidSubnet(String),
    #[error("Invalid IP assignment: {0}")]
    InvalidAssignment(String),
}
