use crate::config::PlanConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse a plan from a YAML file, or JSON when the extension is `.json`
pub fn load_plan(plan_path: &Path) -> Result<PlanConfig> {
    info!("Loading plan from: {:?}", plan_path);

    let file = File::open(plan_path)
        .wrap_err_with(|| format!("Failed to open plan file '{}'", plan_path.display()))?;

    let is_json = plan_path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let plan: PlanConfig = if is_json {
        serde_json::from_reader(file)
            .wrap_err_with(|| format!("Failed to parse JSON plan '{}'", plan_path.display()))?
    } else {
        serde_yaml::from_reader(file)
            .wrap_err_with(|| format!("Failed to parse YAML plan '{}'", plan_path.display()))?
    };

    plan.validate()
        .wrap_err_with(|| format!("Invalid plan '{}'", plan_path.display()))?;

    info!(
        "Loaded plan for {} with {} subnets",
        plan.base_network,
        plan.subnets.len()
    );

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_yaml_plan() {
        let yaml = r#"
base_network: 10.0.0.0/24
subnets:
  - name: A
    hosts: 100
  - name: B
    hosts: 50
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let plan = load_plan(temp_file.path()).unwrap();
        assert_eq!(plan.base_network.cidr(), "10.0.0.0/24");
        assert_eq!(plan.subnets.len(), 2);
    }

    #[test]
    fn test_load_json_plan() {
        let json = r#"{"base_network": "172.16.0.0/16", "subnets": [{"name": "core", "hosts": 1000}]}"#;

        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp_file, "{}", json).unwrap();

        let plan = load_plan(temp_file.path()).unwrap();
        assert_eq!(plan.base_network.cidr(), "172.16.0.0/16");
        assert_eq!(plan.subnets[0].hosts, 1000);
    }

    #[test]
    fn test_load_invalid_plan() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "base_network: 10.0.0.0/24\nsubnets: []\n").unwrap();

        let err = load_plan(temp_file.path()).unwrap_err();
        assert!(err.chain().any(|cause| cause.to_string().contains("at least one subnet")));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_plan(Path::new("/nonexistent/plan.yaml")).is_err());
    }
}
