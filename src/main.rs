use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::io;
use std::path::PathBuf;

use vlsm_planner::config::PlanConfig;
use vlsm_planner::config_loader;
use vlsm_planner::input::prompt_plan;
use vlsm_planner::ip::allocate;
use vlsm_planner::report::{render_error, render_json, render_table, OutputFormat};
use vlsm_planner::utils::{check_duplicate_names, parse_cidr, parse_subnet_spec};

/// Plan VLSM subnets inside a base IPv4 network
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a plan file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    plan: Option<PathBuf>,

    /// Base network in CIDR notation; overrides the plan file's base network
    #[arg(short, long)]
    base: Option<String>,

    /// Subnet requirement as NAME=HOSTS; may be repeated
    #[arg(short, long = "subnet", value_name = "NAME=HOSTS")]
    subnets: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();

    let plan = build_plan(&args)?;
    let requirements = plan.requirements();
    check_duplicate_names(&requirements);

    info!(
        "Allocating {} subnets from {}",
        requirements.len(),
        plan.base_network
    );
    let outcome = allocate(plan.base_network, &requirements);

    match args.format {
        OutputFormat::Table => match &outcome {
            Ok(allocation) => println!("{}", render_table(allocation)),
            Err(error) => println!("{}", render_error(error)),
        },
        OutputFormat::Json => {
            let json = render_json(plan.base_network, &outcome).wrap_err("Failed to render JSON report")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Assemble the plan from a plan file, command-line flags, or interactive prompts
fn build_plan(args: &Args) -> Result<PlanConfig> {
    let base = args
        .base
        .as_deref()
        .map(parse_cidr)
        .transpose()
        .wrap_err("Invalid --base network")?;

    let mut plan = match (&args.plan, base) {
        (Some(path), base) => {
            let mut plan = config_loader::load_plan(path)?;
            if let Some(base) = base {
                info!("Overriding plan base network {} with {}", plan.base_network, base);
                plan.base_network = base;
            }
            plan
        }
        (None, Some(base)) => PlanConfig::new(base),
        (None, None) => {
            info!("No plan file or base network given, prompting for input");
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            let plan = prompt_plan(&mut input, &mut output).wrap_err("Invalid input")?;
            println!();
            plan
        }
    };

    for spec in &args.subnets {
        let requirement = parse_subnet_spec(spec).wrap_err("Invalid --subnet")?;
        plan.push_requirement(requirement);
    }

    plan.validate()?;
    Ok(plan)
}
