use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sars_data::TaxTableLoader;

/// Parse SARS bracket and rebate CSV files and report what they contain.
///
/// The brackets CSV has the columns:
/// - tax_year: the tax year (e.g. 2024)
/// - min_income: lower threshold of the slice
/// - max_income: upper threshold (empty for the open-ended top slice)
/// - base_tax: cumulative tax owed at min_income
/// - rate: marginal rate as a decimal (e.g. 0.18)
///
/// The rebates CSV has the columns: tax_year, primary, secondary, tertiary.
#[derive(Parser, Debug)]
#[command(name = "sars-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing tax bracket data
    #[arg(short, long)]
    brackets: PathBuf,

    /// Path to the CSV file containing rebate data
    #[arg(short, long)]
    rebates: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Loading tax brackets from: {}", args.brackets.display());
    let brackets_file = File::open(&args.brackets)
        .with_context(|| format!("Failed to open: {}", args.brackets.display()))?;
    let brackets = TaxTableLoader::parse_brackets(brackets_file)
        .with_context(|| format!("Failed to parse CSV: {}", args.brackets.display()))?;
    println!("Parsed {} bracket rows", brackets.len());

    println!("Loading rebates from: {}", args.rebates.display());
    let rebates_file = File::open(&args.rebates)
        .with_context(|| format!("Failed to open: {}", args.rebates.display()))?;
    let rebates = TaxTableLoader::parse_rebates(rebates_file)
        .with_context(|| format!("Failed to parse CSV: {}", args.rebates.display()))?;
    println!("Parsed {} rebate rows", rebates.len());

    let tables = TaxTableLoader::build(brackets, rebates).context("Failed to build tax tables")?;

    println!("Assembled tables for {} tax year(s):", tables.len());
    for year in tables.years() {
        if let Some(table) = tables.get(year) {
            println!(
                "  {year}: {} brackets, primary rebate R {}",
                table.brackets().len(),
                table.rebates().primary
            );
        }
    }

    Ok(())
}
