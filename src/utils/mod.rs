//! Shared utilities: input validation and IP parsing helpers.

pub mod ip_utils;
pub mod validation;

pub use ip_utils::{parse_base_network, parse_cidr, parse_subnet_spec};
pub use validation::{check_duplicate_names, parse_host_count, parse_subnet_count, InputError};
