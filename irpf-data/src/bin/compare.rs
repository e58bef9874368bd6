use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use irpf_core::{CalculationInput, IrpfComparator, IrpfConfig};
use irpf_data::{
    BracketTableLoader, ComparisonReport, LabeledInput, ParameterFile, input_loader, logging,
    parse_money,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Compare the Complete and Simplified IRPF regimes.
///
/// Amounts accept `60000.00`, `60.000,00` or `R$ 60.000,00`.
#[derive(Parser, Debug)]
#[command(name = "irpf-compare")]
#[command(version, about, long_about = None)]
struct Args {
    /// Annual taxable income
    #[arg(long, value_parser = parse_money, required_unless_present = "batch")]
    income: Option<Decimal>,

    /// Number of dependents
    #[arg(long, default_value_t = 0)]
    dependents: u32,

    /// Education expenses for the taxpayer and dependents
    #[arg(long, value_parser = parse_money, default_value = "0")]
    education: Decimal,

    /// Health expenses
    #[arg(long, value_parser = parse_money, default_value = "0")]
    health: Decimal,

    /// PGBL contributions
    #[arg(long, value_parser = parse_money, default_value = "0")]
    pgbl: Decimal,

    /// CSV file with one scenario per row (replaces the single-scenario flags)
    #[arg(short, long, conflicts_with = "income")]
    batch: Option<PathBuf>,

    /// TOML file overriding the built-in tax parameters
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// CSV file replacing the bracket table
    #[arg(long)]
    brackets: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Also write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<IrpfConfig> {
    let mut config = match &args.params {
        Some(path) => ParameterFile::from_path(path)
            .and_then(ParameterFile::into_config)
            .with_context(|| format!("Failed to load parameters: {}", path.display()))?,
        None => IrpfConfig::default(),
    };

    if let Some(path) = &args.brackets {
        let file = File::open(path)
            .with_context(|| format!("Failed to open: {}", path.display()))?;
        config = BracketTableLoader::load_into(config, file)
            .with_context(|| format!("Failed to load brackets: {}", path.display()))?;
    }

    Ok(config)
}

fn load_inputs(args: &Args) -> Result<Vec<LabeledInput>> {
    if let Some(path) = &args.batch {
        let inputs = input_loader::load_from_file(path)
            .with_context(|| format!("Failed to load scenarios: {}", path.display()))?;
        info!(count = inputs.len(), "loaded scenarios from {}", path.display());
        return Ok(inputs);
    }

    Ok(vec![LabeledInput {
        label: "scenario".to_string(),
        input: CalculationInput {
            annual_taxable_income: args.income.unwrap_or_default(),
            number_of_dependents: args.dependents,
            education_expenses: args.education,
            health_expenses: args.health,
            pgbl_contributions: args.pgbl,
        },
    }])
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.verbose, args.log_file.as_deref())?;

    let config = load_config(&args)?;
    let comparator = IrpfComparator::new(&config).context("Invalid tax parameters")?;
    debug!(tax_year = config.tax_year, "using parameters");

    let inputs = load_inputs(&args)?;
    let show_labels = args.batch.is_some();

    for scenario in &inputs {
        let result = comparator.compare(&scenario.input);
        let label = show_labels.then_some(scenario.label.as_str());
        println!("{}", ComparisonReport::new(&result, label));
    }

    Ok(())
}
