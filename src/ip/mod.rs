//! IPv4 address blocks and VLSM subnet allocation.
//!
//! This module holds the address block value type and the allocator that
//! packs named host requirements into a base network.

pub mod allocator;
pub mod block;

// Re-export commonly used types
pub use allocator::{
    allocate, prefix_for_hosts, AllocatedSubnet, AllocationError, AllocationPlan, HostRequirement,
    PlacementResult, PlannedSubnet,
};
pub use block::{AddressBlock, BlockError, HostRange};
