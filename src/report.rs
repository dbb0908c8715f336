//! Report generation for allocation results.
//!
//! Renders an allocation plan either as a fixed-width text table or as a
//! JSON document.

use serde::Serialize;

use crate::ip::{AddressBlock, AllocationError, AllocationPlan, PlacementResult};

const HEADERS: [&str; 8] = [
    "Subnet Name",
    "CIDR Notation",
    "Number of IPs",
    "Used Hosts",
    "Host IP Range",
    "Broadcast Address",
    "Remaining Hosts",
    "Network Capacity",
];

const DOES_NOT_FIT: &str = "Cannot fit within the base network";

/// Output format for rendered results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Render the plan as a table whose columns are sized to their widest cell
pub fn render_table(plan: &AllocationPlan) -> String {
    let rows: Vec<Vec<String>> = plan
        .subnets()
        .iter()
        .map(|entry| match &entry.result {
            PlacementResult::Allocated(subnet) => vec![
                entry.name.clone(),
                subnet.cidr(),
                subnet.block.total_addresses().to_string(),
                subnet.required_hosts.to_string(),
                subnet
                    .host_range
                    .map_or_else(|| "N/A".to_string(), |range| range.to_string()),
                subnet.block.broadcast().to_string(),
                subnet.remaining_hosts.to_string(),
                format!("{:.2}%", subnet.utilization),
            ],
            // The message spans the remaining columns
            PlacementResult::DoesNotFit => vec![entry.name.clone(), DOES_NOT_FIT.to_string()],
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        if row.len() != HEADERS.len() {
            widths[0] = widths[0].max(row[0].chars().count());
            continue;
        }
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let header = format_row(header_cells.as_slice());
    let rule = "-".repeat(header.chars().count());

    let mut lines = vec![header, rule];
    lines.extend(rows.iter().map(|row| format_row(row.as_slice())));

    lines.join("\n")
}

/// Render the global allocation failure
pub fn render_error(error: &AllocationError) -> String {
    format!("Subnet calculation error: {}", error)
}

#[derive(Serialize)]
struct JsonReport {
    base_network: AddressBlock,
    netmask: String,
    total_addresses: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    subnets: Vec<JsonSubnet>,
}

#[derive(Serialize)]
struct JsonSubnet {
    name: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<JsonSubnetDetails>,
}

#[derive(Serialize)]
struct JsonSubnetDetails {
    cidr: String,
    network: String,
    netmask: String,
    broadcast: String,
    total_addresses: u64,
    used_hosts: u32,
    host_range: Option<String>,
    remaining_hosts: u64,
    utilization: f64,
}

/// Render an allocation outcome as pretty-printed JSON
pub fn render_json(
    base: AddressBlock,
    outcome: &Result<AllocationPlan, AllocationError>,
) -> serde_json::Result<String> {
    let (error, subnets): (Option<String>, Vec<JsonSubnet>) = match outcome {
        Ok(plan) => (None, plan.subnets().iter().map(json_subnet).collect()),
        Err(err) => (Some(err.to_string()), Vec::new()),
    };

    let report = JsonReport {
        base_network: base,
        netmask: base.netmask().to_string(),
        total_addresses: base.total_addresses(),
        error,
        subnets,
    };

    serde_json::to_string_pretty(&report)
}

fn json_subnet(entry: &crate::ip::PlannedSubnet) -> JsonSubnet {
    match &entry.result {
        PlacementResult::Allocated(subnet) => JsonSubnet {
            name: entry.name.clone(),
            status: "allocated",
            details: Some(JsonSubnetDetails {
                cidr: subnet.cidr(),
                network: subnet.block.network().to_string(),
                netmask: subnet.block.netmask().to_string(),
                broadcast: subnet.block.broadcast().to_string(),
                total_addresses: subnet.block.total_addresses(),
                used_hosts: subnet.required_hosts,
                host_range: subnet.host_range.map(|range| range.to_string()),
                remaining_hosts: subnet.remaining_hosts,
                utilization: subnet.utilization,
            }),
        },
        PlacementResult::DoesNotFit => JsonSubnet {
            name: entry.name.clone(),
            status: "does_not_fit",
            details: None,
        },
    }
}
