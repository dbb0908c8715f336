//! VLSM subnet allocation.
//!
//! This file contains the core allocation algorithm: requirements are
//! ordered by descending host count, each is sized to the smallest
//! power-of-two block that holds its hosts plus the network and broadcast
//! addresses, and blocks are packed back-to-back from the start of the
//! base network.

use std::cmp::Reverse;
use std::net::Ipv4Addr;

use log::{debug, info, warn};
use serde::Serialize;

use super::block::{AddressBlock, HostRange};

/// Network and broadcast addresses reserved in every block
const RESERVED_ADDRESSES: u64 = 2;

/// A named subnet and the number of hosts it must hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRequirement {
    pub name: String,
    pub hosts: u32,
}

impl HostRequirement {
    pub fn new(name: impl Into<String>, hosts: u32) -> Self {
        Self { name: name.into(), hosts }
    }

    /// Addresses this requirement consumes before rounding to a block size
    pub fn addresses_needed(&self) -> u64 {
        u64::from(self.hosts) + RESERVED_ADDRESSES
    }
}

/// Global allocation failure, detected before any subnet is sized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("The total number of hosts exceeds the capacity of the base network ({required} addresses required, {available} available)")]
    CapacityExceeded { required: u64, available: u64 },
}

/// A successfully placed subnet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocatedSubnet {
    pub block: AddressBlock,
    pub required_hosts: u32,
    pub host_range: Option<HostRange>,
    pub remaining_hosts: u64,
    /// Percentage of usable hosts consumed, rounded to 2 decimals
    pub utilization: f64,
}

impl AllocatedSubnet {
    fn new(block: AddressBlock, required_hosts: u32) -> Self {
        let usable = block.usable_hosts();
        let utilization = if usable == 0 {
            0.0
        } else {
            round_percent(f64::from(required_hosts) / usable as f64 * 100.0)
        };

        Self {
            block,
            required_hosts,
            host_range: block.host_range(),
            remaining_hosts: usable.saturating_sub(u64::from(required_hosts)),
            utilization,
        }
    }

    pub fn cidr(&self) -> String {
        self.block.cidr()
    }
}

/// Outcome for a single requirement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlacementResult {
    Allocated(AllocatedSubnet),
    /// The sized block would extend past the end of the base network
    DoesNotFit,
}

impl PlacementResult {
    pub fn allocated(&self) -> Option<&AllocatedSubnet> {
        match self {
            PlacementResult::Allocated(subnet) => Some(subnet),
            PlacementResult::DoesNotFit => None,
        }
    }
}

/// One entry of an allocation plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSubnet {
    pub name: String,
    #[serde(flatten)]
    pub result: PlacementResult,
}

/// Result of a successful allocation run, in processing order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationPlan {
    base: AddressBlock,
    subnets: Vec<PlannedSubnet>,
}

impl AllocationPlan {
    pub fn base(&self) -> AddressBlock {
        self.base
    }

    /// Entries ordered by descending host count (ties in input order)
    pub fn subnets(&self) -> &[PlannedSubnet] {
        &self.subnets
    }

    pub fn get(&self, name: &str) -> Option<&PlacementResult> {
        self.subnets.iter().find(|s| s.name == name).map(|s| &s.result)
    }

    pub fn allocated(&self) -> impl Iterator<Item = (&str, &AllocatedSubnet)> {
        self.subnets
            .iter()
            .filter_map(|s| s.result.allocated().map(|a| (s.name.as_str(), a)))
    }

    /// Names of requirements that could not be placed
    pub fn unplaced(&self) -> impl Iterator<Item = &str> {
        self.subnets
            .iter()
            .filter(|s| s.result == PlacementResult::DoesNotFit)
            .map(|s| s.name.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced().next().is_none()
    }

    /// Addresses consumed by placed blocks
    pub fn addresses_used(&self) -> u64 {
        self.allocated().map(|(_, a)| a.block.total_addresses()).sum()
    }
}

/// Smallest prefix whose block holds `hosts` usable addresses.
///
/// `host_bits = ceil(log2(hosts + 2))`, so an exact power of two is not
/// rounded up further. Returns `None` when no IPv4 block is large enough.
pub fn prefix_for_hosts(hosts: u32) -> Option<u8> {
    let needed = u64::from(hosts) + RESERVED_ADDRESSES;
    let host_bits = needed.next_power_of_two().trailing_zeros();
    if host_bits > 32 {
        return None;
    }
    u8::try_from(32 - host_bits).ok().map(|prefix| prefix.min(32))
}

/// Allocate one subnet per requirement from `base`.
///
/// Fails as a whole only when `Σ(hosts + 2)` exceeds the base network's
/// address count. A requirement whose rounded block runs past the end of
/// the base network is reported as [`PlacementResult::DoesNotFit`] and the
/// remaining requirements are still evaluated.
pub fn allocate(
    base: AddressBlock,
    requirements: &[HostRequirement],
) -> Result<AllocationPlan, AllocationError> {
    let required: u64 = requirements.iter().map(HostRequirement::addresses_needed).sum();
    let available = base.total_addresses();
    debug!(
        "Capacity check for {}: {} addresses required, {} available",
        base, required, available
    );
    if required > available {
        return Err(AllocationError::CapacityExceeded { required, available });
    }

    let mut ordered: Vec<&HostRequirement> = requirements.iter().collect();
    ordered.sort_by_key(|r| Reverse(r.hosts));

    let mut next_start = u64::from(u32::from(base.network()));
    let mut subnets = Vec::with_capacity(ordered.len());

    for requirement in ordered {
        let candidate = prefix_for_hosts(requirement.hosts)
            .and_then(|prefix| block_at(next_start, prefix))
            .filter(|block| u64::from(u32::from(block.network())) == next_start)
            .filter(|block| base.contains_block(block));

        let result = match candidate {
            Some(block) => {
                debug!(
                    "Placed '{}' ({} hosts) at {}",
                    requirement.name, requirement.hosts, block
                );
                next_start = block.next_address();
                PlacementResult::Allocated(AllocatedSubnet::new(block, requirement.hosts))
            }
            None => {
                warn!(
                    "Subnet '{}' ({} hosts) cannot fit within base network {}",
                    requirement.name, requirement.hosts, base
                );
                PlacementResult::DoesNotFit
            }
        };

        subnets.push(PlannedSubnet {
            name: requirement.name.clone(),
            result,
        });
    }

    let plan = AllocationPlan { base, subnets };
    info!(
        "Allocated {} of {} subnets from {} ({} of {} addresses used)",
        plan.allocated().count(),
        plan.subnets.len(),
        base,
        plan.addresses_used(),
        available
    );
    Ok(plan)
}

/// Candidate block at the cursor, or `None` once the cursor has run past
/// the end of the IPv4 space
fn block_at(cursor: u64, prefix: u8) -> Option<AddressBlock> {
    let addr = u32::try_from(cursor).ok()?;
    AddressBlock::new(Ipv4Addr::from(addr), prefix).ok()
}

fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
