//! Interactive plan collection.
//!
//! Prompts for the base network and each subnet on a line-oriented reader.
//! Any invalid answer aborts collection with an [`InputError`]; nothing is
//! handed to the allocator until the whole plan has been read.

use std::io::{BufRead, Write};

use crate::config::PlanConfig;
use crate::ip::HostRequirement;
use crate::utils::ip_utils::parse_base_network;
use crate::utils::validation::{parse_host_count, parse_subnet_count, validate_subnet_name, InputError};

/// Collect a plan by prompting on `output` and reading answers from `input`
pub fn prompt_plan<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<PlanConfig, InputError> {
    let ip = ask(input, output, "Enter the base network IP address (e.g., 192.168.1.0): ")?;
    let prefix = ask(input, output, "Enter the network size as a prefix length (e.g., 24 for /24): ")?;
    let base = parse_base_network(&ip, &prefix)?;

    let count = ask(input, output, "Enter the number of subnets: ")?;
    let count = parse_subnet_count(&count)?;

    let mut plan = PlanConfig::new(base);
    for index in 1..=count {
        let name = ask(input, output, &format!("Enter the name for subnet {}: ", index))?;
        let name = validate_subnet_name(&name)?;
        let hosts = ask(input, output, &format!("Enter the number of hosts for '{}': ", name))?;
        let hosts = parse_host_count(&name, &hosts)?;
        plan.push_requirement(HostRequirement::new(name, hosts));
    }

    log::debug!("Collected {} subnets for {}", plan.subnets.len(), plan.base_network);
    Ok(plan)
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String, InputError> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InputError::UnexpectedEof);
    }
    Ok(line.trim().to_string())
}
