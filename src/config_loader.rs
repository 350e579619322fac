use crate::config::{NetworkConfig, PlanConfig, SubnetRequest};
use color_eyre::eyre::WrapErr;
use color_eyre::{Result, Section};
use log::info;
use serde::Deserialize;
use std::path::Path;

/// A configuration file holds either one network or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigDocument {
    Many(Vec<NetworkConfig>),
    Single(NetworkConfig),
}

impl From<ConfigDocument> for PlanConfig {
    fn from(document: ConfigDocument) -> Self {
        let networks = match document {
            ConfigDocument::Many(networks) => networks,
            ConfigDocument::Single(network) => vec![network],
        };
        PlanConfig { networks }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the file extension, JSON unless it says YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}

/// Load and parse a planning configuration file
pub fn load_config(config_path: &Path) -> Result<PlanConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)
        .wrap_err_with(|| format!("error reading config file '{}'", config_path.display()))?;

    parse_config(&content, ConfigFormat::from_path(config_path))
        .wrap_err_with(|| format!("error parsing config file '{}'", config_path.display()))
}

/// Parse configuration text in the given format and validate it
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<PlanConfig> {
    let document: ConfigDocument = match format {
        ConfigFormat::Json => serde_json::from_str::<ConfigDocument>(content).map_err(color_eyre::Report::from),
        ConfigFormat::Yaml => serde_yaml::from_str::<ConfigDocument>(content).map_err(color_eyre::Report::from),
    }
    .wrap_err("configuration does not describe a network or a list of networks")
    .suggestion("check that 'vlan', 'hosts' and 'cidr' are integers, e.g. \"vlan\": 100 rather than \"vlan\": \"100\"")
    .suggestion("single network: {\"network\": \"...\", \"subnets\": [...]}; multiple networks: [{\"network\": \"...\", \"subnets\": [...]}, ...]")?;

    let config = PlanConfig::from(document);
    info!("Loaded {} network(s)", config.networks.len());

    config.validate()?;
    Ok(config)
}

/// Which size field a CLI spec fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Hosts,
    Prefix,
}

/// Errors in `value:count` size specs given on the command line
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("invalid spec segment: {0}")]
    Segment(String),

    #[error("invalid number in spec: {0}")]
    Value(String),

    #[error("invalid count in spec: {0}")]
    Count(String),

    #[error("value and count must be >0: {0}")]
    NotPositive(String),
}

/// Expand a `value:count[,value:count...]` spec into subnet requests
///
/// `50:2,10:3` with [`SizeKind::Hosts`] yields `hosts-50-1`, `hosts-50-2`
/// and three `hosts-10-*` requests. Prefix specs are named `cidr-<value>-<n>`.
pub fn parse_size_spec(spec: &str, kind: SizeKind) -> Result<Vec<SubnetRequest>, SpecError> {
    let mut requests = Vec::new();

    for segment in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (value, count) = segment
            .split_once(':')
            .filter(|(_, count)| !count.contains(':'))
            .ok_or_else(|| SpecError::Segment(segment.to_string()))?;

        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| SpecError::Value(value.to_string()))?;
        let count: i64 = count
            .trim()
            .parse()
            .map_err(|_| SpecError::Count(count.to_string()))?;
        if value <= 0 || count <= 0 {
            return Err(SpecError::NotPositive(segment.to_string()));
        }

        for i in 1..=count {
            let request = match kind {
                SizeKind::Hosts => {
                    SubnetRequest::with_hosts(format!("hosts-{}-{}", value, i), value as u64)
                }
                SizeKind::Prefix => {
                    let prefix =
                        u8::try_from(value).map_err(|_| SpecError::Value(value.to_string()))?;
                    SubnetRequest::with_prefix(format!("cidr-{}-{}", value, i), prefix)
                }
            };
            requests.push(request);
        }
    }

    Ok(requests)
}

/// Build a one-network configuration from command-line specs
pub fn inline_config(network: &str, hosts_spec: Option<&str>, cidr_spec: Option<&str>) -> Result<PlanConfig> {
    let mut subnets = parse_size_spec(hosts_spec.unwrap_or_default(), SizeKind::Hosts)?;
    subnets.extend(parse_size_spec(cidr_spec.unwrap_or_default(), SizeKind::Prefix)?);

    if subnets.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "provide at least one --hosts or --cidr spec when using --network"
        ));
    }

    let config = PlanConfig {
        networks: vec![NetworkConfig::new(network, subnets)],
    };
    config.validate()?;
    Ok(config)
}
