//! IPv4 address blocks.
//!
//! An [`AddressBlock`] is an immutable (network address, prefix length) pair.
//! Everything else about the block (netmask, broadcast, address count, usable
//! host range) is derived on demand from the underlying [`Ipv4Net`].

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// Errors that can occur while building an address block
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    #[error("Invalid prefix length /{0} (must be 0-32)")]
    InvalidPrefix(u8),

    #[error("Invalid CIDR block '{0}'")]
    InvalidCidr(String),
}

/// Contiguous IPv4 range expressed as network address and prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Ipv4Net", from = "Ipv4Net")]
pub struct AddressBlock {
    net: Ipv4Net,
}

/// First and last usable host address of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostRange {
    pub first: Ipv4Addr,
    pub last: Ipv4Addr,
}

impl fmt::Display for HostRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.first, self.last)
    }
}

impl AddressBlock {
    /// Build a block from any address inside it; host bits are cleared.
    ///
    /// `192.168.1.7/24` becomes `192.168.1.0/24`.
    pub fn new(addr: Ipv4Addr, prefix_len: u8) -> Result<Self, BlockError> {
        let net = Ipv4Net::new(addr, prefix_len).map_err(|_| BlockError::InvalidPrefix(prefix_len))?;
        Ok(Self::from(net))
    }

    pub fn network(&self) -> Ipv4Addr {
        self.net.network()
    }

    pub fn prefix_len(&self) -> u8 {
        self.net.prefix_len()
    }

    pub fn netmask(&self) -> Ipv4Addr {
        self.net.netmask()
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        self.net.broadcast()
    }

    /// Total number of addresses, `2^(32 - prefix)`. A /0 holds 2^32.
    pub fn total_addresses(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix_len()))
    }

    /// Addresses left once network and broadcast are reserved
    pub fn usable_hosts(&self) -> u64 {
        self.total_addresses().saturating_sub(2)
    }

    /// Usable host range, or `None` for /31 and /32 blocks
    pub fn host_range(&self) -> Option<HostRange> {
        if self.usable_hosts() == 0 {
            return None;
        }
        let first = u32::from(self.network()) + 1;
        let last = u32::from(self.broadcast()) - 1;
        Some(HostRange {
            first: Ipv4Addr::from(first),
            last: Ipv4Addr::from(last),
        })
    }

    /// Whether `other` lies entirely inside this block
    pub fn contains_block(&self, other: &AddressBlock) -> bool {
        self.net.contains(&other.net)
    }

    pub fn overlaps(&self, other: &AddressBlock) -> bool {
        self.contains_block(other) || other.contains_block(self)
    }

    /// First address past the broadcast, as a u64 so the end of the
    /// IPv4 space (2^32) is representable
    pub fn next_address(&self) -> u64 {
        u64::from(u32::from(self.broadcast())) + 1
    }

    /// CIDR notation, e.g. `10.0.0.128/26`
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.network(), self.prefix_len())
    }
}

impl From<Ipv4Net> for AddressBlock {
    fn from(net: Ipv4Net) -> Self {
        Self { net: net.trunc() }
    }
}

impl From<AddressBlock> for Ipv4Net {
    fn from(block: AddressBlock) -> Self {
        block.net
    }
}

impl FromStr for AddressBlock {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Ipv4Net>()
            .map(Self::from)
            .map_err(|_| BlockError::InvalidCidr(s.to_string()))
    }
}

impl fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cidr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(s: &str) -> AddressBlock {
        s.parse().unwrap()
    }

    #[test]
    fn test_derived_values() {
        let b = block("10.0.0.128/26");
        assert_eq!(b.network(), Ipv4Addr::new(10, 0, 0, 128));
        assert_eq!(b.netmask(), Ipv4Addr::new(255, 255, 255, 192));
        assert_eq!(b.broadcast(), Ipv4Addr::new(10, 0, 0, 191));
        assert_eq!(b.total_addresses(), 64);
        assert_eq!(b.usable_hosts(), 62);

        let range = b.host_range().unwrap();
        assert_eq!(range.first, Ipv4Addr::new(10, 0, 0, 129));
        assert_eq!(range.last, Ipv4Addr::new(10, 0, 0, 190));
        assert_eq!(range.to_string(), "10.0.0.129 - 10.0.0.190");
    }

    #[test]
    fn test_host_bits_are_truncated() {
        let b = AddressBlock::new(Ipv4Addr::new(192, 168, 1, 77), 24).unwrap();
        assert_eq!(b.cidr(), "192.168.1.0/24");
        assert_eq!(block("192.168.1.77/24"), b);
    }

    #[test]
    fn test_invalid_prefix() {
        assert_eq!(
            AddressBlock::new(Ipv4Addr::new(10, 0, 0, 0), 33),
            Err(BlockError::InvalidPrefix(33))
        );
        assert!("10.0.0.0/40".parse::<AddressBlock>().is_err());
        assert!("not-a-network".parse::<AddressBlock>().is_err());
    }

    #[test]
    fn test_point_to_point_and_host_blocks() {
        let p2p = block("10.0.0.4/31");
        assert_eq!(p2p.total_addresses(), 2);
        assert_eq!(p2p.usable_hosts(), 0);
        assert_eq!(p2p.host_range(), None);

        let host = block("10.0.0.9/32");
        assert_eq!(host.total_addresses(), 1);
        assert_eq!(host.usable_hosts(), 0);
        assert_eq!(host.broadcast(), Ipv4Addr::new(10, 0, 0, 9));
    }

    #[test]
    fn test_whole_space() {
        let all = block("0.0.0.0/0");
        assert_eq!(all.total_addresses(), 1u64 << 32);
        assert_eq!(all.next_address(), 1u64 << 32);
    }

    #[test]
    fn test_containment_and_overlap() {
        let base = block("10.0.0.0/24");
        let inner = block("10.0.0.192/27");
        let outside = block("10.0.1.0/27");
        let wider = block("10.0.0.0/23");

        assert!(base.contains_block(&inner));
        assert!(base.contains_block(&base));
        assert!(!base.contains_block(&outside));
        assert!(!base.contains_block(&wider));

        assert!(base.overlaps(&inner));
        assert!(base.overlaps(&wider));
        assert!(!inner.overlaps(&outside));
    }

    #[test]
    fn test_serde_as_cidr_string() {
        let b = block("172.16.4.0/22");
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "\"172.16.4.0/22\"");

        let parsed: AddressBlock = serde_json::from_str("\"172.16.5.9/22\"").unwrap();
        assert_eq!(parsed, b);
    }
}
