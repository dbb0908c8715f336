//! # vlsm-planner - VLSM subnet planning for IPv4 networks
//!
//! This library carves named subnets out of a single base network using
//! Variable Length Subnet Masking.
//!
//! ## Overview
//!
//! Each requirement is a subnet name and the number of usable hosts it needs.
//! Requirements are placed largest first, each in the smallest power-of-two
//! block that holds its hosts plus the network and broadcast addresses, and
//! the blocks are packed back-to-back from the start of the base network.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `ip`: address blocks and the allocator itself
//! - `config`: plan file structures
//! - `config_loader`: plan file loading (YAML or JSON)
//! - `input`: interactive plan collection
//! - `report`: table and JSON rendering of allocation results
//! - `utils`: input validation and IP parsing helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use vlsm_planner::ip::{allocate, AddressBlock, HostRequirement};
//!
//! let base: AddressBlock = "10.0.0.0/24".parse()?;
//! let plan = allocate(
//!     base,
//!     &[
//!         HostRequirement::new("A", 100),
//!         HostRequirement::new("B", 50),
//!         HostRequirement::new("C", 20),
//!     ],
//! )?;
//!
//! let cidrs: Vec<String> = plan.allocated().map(|(_, subnet)| subnet.cidr()).collect();
//! assert_eq!(cidrs, ["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/27"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Plan Format
//!
//! ```yaml
//! base_network: 192.168.1.0/24
//! subnets:
//!   - name: Sales
//!     hosts: 100
//!   - name: Engineering
//!     hosts: 50
//! ```
//!
//! ## Error Handling
//!
//! The allocator returns typed `thiserror` errors; a requirement that cannot
//! be placed is a value inside the plan rather than an error. File loading
//! and the binary use `color_eyre` for error reporting with context.

pub mod config;
pub mod config_loader;
pub mod input;
pub mod ip;
pub mod report;
pub mod utils;
