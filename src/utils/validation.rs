//! Input validation utilities.
//!
//! Everything here runs before the allocator is called. A failure aborts
//! the run with an [`InputError`]; it never becomes part of an allocation
//! outcome.

use std::collections::HashSet;

use crate::ip::HostRequirement;

/// Errors raised while collecting or validating user input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Invalid IP address '{0}'. Please enter a valid IPv4 address.")]
    InvalidAddress(String),

    #[error("Invalid network size '{0}' (expected a prefix length between 0 and 32)")]
    InvalidPrefix(String),

    #[error("Number of subnets must be a positive integer, got '{0}'")]
    InvalidSubnetCount(String),

    #[error("Number of hosts for '{name}' must be a non-negative integer, got '{value}'")]
    InvalidHostCount { name: String, value: String },

    #[error("Subnet name cannot be empty")]
    EmptyName,

    #[error("Invalid subnet '{0}' (expected NAME=HOSTS)")]
    InvalidSubnetSpec(String),

    #[error("Input ended before all values were entered")]
    UnexpectedEof,

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse the number of subnets; it must be a positive integer
///
/// # Examples
/// ```
/// use vlsm_planner::utils::validation::parse_subnet_count;
///
/// assert_eq!(parse_subnet_count("3").unwrap(), 3);
/// assert!(parse_subnet_count("0").is_err());
/// assert!(parse_subnet_count("-2").is_err());
/// ```
pub fn parse_subnet_count(value: &str) -> Result<usize, InputError> {
    match value.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(InputError::InvalidSubnetCount(value.trim().to_string())),
    }
}

/// Parse a host count for the named subnet; negative and non-numeric
/// values are rejected
pub fn parse_host_count(name: &str, value: &str) -> Result<u32, InputError> {
    value.trim().parse::<u32>().map_err(|_| InputError::InvalidHostCount {
        name: name.to_string(),
        value: value.trim().to_string(),
    })
}

/// Validate a subnet name and return it trimmed
pub fn validate_subnet_name(name: &str) -> Result<String, InputError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(name.to_string())
}

/// Warn about duplicated subnet names
///
/// Duplicates are not rejected: each one is still allocated its own block,
/// but lookups by name only see the first.
///
/// # Returns
/// The duplicated names, in the order they were first repeated
pub fn check_duplicate_names(requirements: &[HostRequirement]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for requirement in requirements {
        if !seen.insert(requirement.name.as_str()) && !duplicates.contains(&requirement.name) {
            log::warn!(
                "Subnet name '{}' is used more than once; results are reported per entry",
                requirement.name
            );
            duplicates.push(requirement.name.clone());
        }
    }

    duplicates
}
