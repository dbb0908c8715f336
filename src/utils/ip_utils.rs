use std::net::Ipv4Addr;

use crate::ip::{AddressBlock, HostRequirement};

use super::validation::{parse_host_count, validate_subnet_name, InputError};

/// IP utility functions for parsing user-supplied networks and subnets

/// Check if a string is a valid IPv4 address
pub fn is_valid_ipv4(ip: &str) -> bool {
    ip.trim().parse::<Ipv4Addr>().is_ok()
}

/// Build the base network from an address and a prefix length.
///
/// Host bits are cleared, so `192.168.1.7` with `24` yields `192.168.1.0/24`.
/// A leading `/` on the prefix is accepted.
pub fn parse_base_network(ip: &str, prefix: &str) -> Result<AddressBlock, InputError> {
    let addr = ip
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| InputError::InvalidAddress(ip.trim().to_string()))?;

    let prefix = prefix.trim();
    let prefix_len = prefix
        .strip_prefix('/')
        .unwrap_or(prefix)
        .parse::<u8>()
        .map_err(|_| InputError::InvalidPrefix(prefix.to_string()))?;

    AddressBlock::new(addr, prefix_len).map_err(|_| InputError::InvalidPrefix(prefix.to_string()))
}

/// Parse a base network written in CIDR notation, e.g. `10.0.0.0/24`
pub fn parse_cidr(value: &str) -> Result<AddressBlock, InputError> {
    match value.trim().split_once('/') {
        Some((ip, prefix)) => parse_base_network(ip, prefix),
        None => Err(InputError::InvalidAddress(value.trim().to_string())),
    }
}

/// Parse a `NAME=HOSTS` subnet specification
pub fn parse_subnet_spec(spec: &str) -> Result<HostRequirement, InputError> {
    let (name, hosts) = spec
        .rsplit_once('=')
        .ok_or_else(|| InputError::InvalidSubnetSpec(spec.to_string()))?;
    let name = validate_subnet_name(name)?;
    let hosts = parse_host_count(&name, hosts)?;
    Ok(HostRequirement::new(name, hosts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.1.0"));
        assert!(is_valid_ipv4(" 10.0.0.1 "));
        assert!(!is_valid_ipv4("256.0.0.1"));
        assert!(!is_valid_ipv4("::1"));
    }

    #[test]
    fn test_parse_base_network() {
        let base = parse_base_network("192.168.1.0", "24").unwrap();
        assert_eq!(base.cidr(), "192.168.1.0/24");

        let base = parse_base_network("192.168.1.77", "/26").unwrap();
        assert_eq!(base.cidr(), "192.168.1.64/26");

        assert!(matches!(
            parse_base_network("192.168.1", "24"),
            Err(InputError::InvalidAddress(_))
        ));
        assert!(matches!(
            parse_base_network("192.168.1.0", "33"),
            Err(InputError::InvalidPrefix(_))
        ));
        assert!(matches!(
            parse_base_network("192.168.1.0", "-1"),
            Err(InputError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_parse_cidr() {
        assert_eq!(parse_cidr("10.20.0.0/16").unwrap().cidr(), "10.20.0.0/16");
        assert!(parse_cidr("10.20.0.0").is_err());
        assert!(parse_cidr("2001:db8::/32").is_err());
    }

    #[test]
    fn test_parse_subnet_spec() {
        let req = parse_subnet_spec("Sales=100").unwrap();
        assert_eq!(req, HostRequirement::new("Sales", 100));

        let req = parse_subnet_spec("lab=a=b=3").unwrap();
        assert_eq!(req.name, "lab=a=b");
        assert_eq!(req.hosts, 3);

        assert!(matches!(parse_subnet_spec("Sales"), Err(InputError::InvalidSubnetSpec(_))));
        assert!(matches!(parse_subnet_spec("=10"), Err(InputError::EmptyName)));
        assert!(matches!(
            parse_subnet_spec("Sales=-3"),
            Err(InputError::InvalidHostCount { .. })
        ));
    }
}
