use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use sars_cli::forms;
use sars_cli::input::format_rand;
use sars_core::{TaxEngine, TaxTables, tables};
use sars_data::TaxTableLoader;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// SARS personal income tax calculator.
///
/// Without a subcommand, walks the registration form and then loops the
/// calculator. `assess` computes a single assessment directly.
#[derive(Debug, Parser)]
#[command(name = "sars-tax", version, about)]
struct Cli {
    /// CSV file with bracket tables (defaults to the built-in 2023/2024 data).
    #[arg(long, requires = "rebates")]
    brackets: Option<PathBuf>,

    /// CSV file with rebate tables.
    #[arg(long, requires = "brackets")]
    rebates: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute one assessment without the interactive screens.
    Assess {
        /// Annual income in rand.
        #[arg(long)]
        income: Decimal,

        /// Age in whole years.
        #[arg(long)]
        age: u32,

        /// Tax year, e.g. 2024.
        #[arg(long)]
        year: i32,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── table loading ───────────────────────────────────────────────────────────

fn load_tables(cli: &Cli) -> Result<TaxTables> {
    let (Some(brackets_path), Some(rebates_path)) = (&cli.brackets, &cli.rebates) else {
        return Ok(tables::builtin());
    };

    let brackets_file = File::open(brackets_path)
        .with_context(|| format!("Failed to open: {}", brackets_path.display()))?;
    let brackets = TaxTableLoader::parse_brackets(brackets_file)
        .with_context(|| format!("Failed to parse CSV: {}", brackets_path.display()))?;

    let rebates_file = File::open(rebates_path)
        .with_context(|| format!("Failed to open: {}", rebates_path.display()))?;
    let rebates = TaxTableLoader::parse_rebates(rebates_file)
        .with_context(|| format!("Failed to parse CSV: {}", rebates_path.display()))?;

    TaxTableLoader::build(brackets, rebates).context("Failed to build tax tables")
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let engine = TaxEngine::new(load_tables(&cli)?);

    match cli.command {
        Some(Command::Assess { income, age, year }) => {
            let assessment = engine.assess(income, age, year)?;
            println!(
                "Tax before rebates: {}",
                format_rand(assessment.tax_before_rebates)
            );
            println!("Rebates:            {}", format_rand(assessment.rebates));
            println!(
                "Your total tax payable is: {}",
                format_rand(assessment.net_payable)
            );
        }
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_session(&engine, &mut stdin.lock(), &mut stdout.lock())?;
        }
    }

    Ok(())
}

fn run_session<R: BufRead, W: Write>(
    engine: &TaxEngine,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    forms::run(engine, input, out).context("session aborted")
}
