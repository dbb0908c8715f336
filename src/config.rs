use serde::{Deserialize, Serialize};

use crate::ip::{AddressBlock, HostRequirement};

/// Top-level plan structure that mirrors the YAML plan file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Base network in CIDR notation; host bits are cleared on load
    pub base_network: AddressBlock,
    /// Subnets to carve out of the base network, in input order
    #[serde(default)]
    pub subnets: Vec<SubnetConfig>,
}

/// A single named subnet requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetConfig {
    /// Name of this subnet
    pub name: String,
    /// Number of usable hosts required
    pub hosts: u32,
}

/// Plan validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Plan must define at least one subnet")]
    NoSubnets,
    #[error("Subnet #{0} has an empty name")]
    EmptySubnetName(usize),
}

impl PlanConfig {
    pub fn new(base_network: AddressBlock) -> Self {
        Self {
            base_network,
            subnets: Vec::new(),
        }
    }

    /// Validate the plan
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subnets.is_empty() {
            return Err(ValidationError::NoSubnets);
        }

        for (index, subnet) in self.subnets.iter().enumerate() {
            if subnet.name.trim().is_empty() {
                return Err(ValidationError::EmptySubnetName(index + 1));
            }
        }

        Ok(())
    }

    /// Host requirements in file order
    pub fn requirements(&self) -> Vec<HostRequirement> {
        self.subnets
            .iter()
            .map(|s| HostRequirement::new(s.name.trim(), s.hosts))
            .collect()
    }

    /// Append a requirement after the ones already in the plan
    pub fn push_requirement(&mut self, requirement: HostRequirement) {
        self.subnets.push(requirement.into());
    }
}

impl From<HostRequirement> for SubnetConfig {
    fn from(requirement: HostRequirement) -> Self {
        Self {
            name: requirement.name,
            hosts: requirement.hosts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parsing() {
        let yaml = r#"
base_network: 192.168.1.7/24
subnets:
  - name: Sales
    hosts: 100
  - name: " Engineering "
    hosts: 50
"#;

        let plan: PlanConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plan.base_network.cidr(), "192.168.1.0/24");
        assert!(plan.validate().is_ok());

        let requirements = plan.requirements();
        assert_eq!(requirements[0], HostRequirement::new("Sales", 100));
        assert_eq!(requirements[1], HostRequirement::new("Engineering", 50));
    }

    #[test]
    fn test_negative_hosts_rejected_by_parser() {
        let yaml = r#"
base_network: 10.0.0.0/24
subnets:
  - name: A
    hosts: -5
"#;
        assert!(serde_yaml::from_str::<PlanConfig>(yaml).is_err());
    }

    #[test]
    fn test_invalid_base_network_rejected_by_parser() {
        assert!(serde_yaml::from_str::<PlanConfig>("base_network: 10.0.0.0/33\n").is_err());
        assert!(serde_yaml::from_str::<PlanConfig>("base_network: 10.0.0\n").is_err());
    }

    #[test]
    fn test_validation_errors() {
        let mut plan: PlanConfig = serde_yaml::from_str("base_network: 10.0.0.0/24\n").unwrap();
        assert!(matches!(plan.validate(), Err(ValidationError::NoSubnets)));

        plan.push_requirement(HostRequirement::new("A", 5));
        plan.subnets.push(SubnetConfig { name: "  ".to_string(), hosts: 1 });
        assert!(matches!(plan.validate(), Err(ValidationError::EmptySubnetName(2))));
    }
}
