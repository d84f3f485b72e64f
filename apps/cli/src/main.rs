//! # swarna: Jewellery Pricing CLI
//!
//! Prices product records against the day's gold rates and totals invoices,
//! using `swarna-core` for every calculation.
//!
//! ## Usage
//! ```text
//! swarna price --input ring.json [--date 2024-03-01]
//! swarna invoice --input invoice.json
//! swarna validate-charge --type percentage --value 12.5 [--kind making]
//! swarna check-category --code GOLD22
//!
//! Global: --config <swarna.toml>  --json
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Parse arguments
//! 3. Load swarna.toml + environment overrides
//! 4. Run the subcommand, print text or JSON to stdout

mod commands;
mod config;
mod error;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use swarna_core::ChargeKind;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::commands::{InvoiceRequest, PriceRequest};
use crate::config::SwarnaConfig;
use crate::error::CliResult;
use crate::report::{InvoiceView, PriceView};

#[derive(Debug, Parser)]
#[command(name = "swarna", version, about = "Jewellery pricing and invoice calculator")]
struct Cli {
    /// Config file (defaults to the platform config dir's swarna.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of a text report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price product records with the rate of the day
    Price {
        /// JSON file: one record, an array, or {items, discount, advance}
        #[arg(long)]
        input: PathBuf,

        /// Rate date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Total an invoice priced with labour rates
    Invoice {
        /// JSON file: {items, discount, advance}
        #[arg(long)]
        input: PathBuf,
    },

    /// Check a making/wastage charge configuration
    ValidateCharge {
        /// Charge type code (percentage, per_gram, fixed_amount, per_piece, none)
        #[arg(long = "type")]
        charge_type: String,

        #[arg(long)]
        value: Option<Decimal>,

        /// Also check the type is known and allowed for this charge
        #[arg(long)]
        kind: Option<KindArg>,
    },

    /// Check whether a category code may be deleted
    CheckCategory {
        #[arg(long)]
        code: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Making,
    Wastage,
}

impl From<KindArg> for ChargeKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Making => ChargeKind::Making,
            KindArg::Wastage => ChargeKind::Wastage,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = match cli.config {
        Some(path) => SwarnaConfig::load(Some(path))?,
        None => SwarnaConfig::load_or_default(None),
    };
    debug!(pricing = ?config.pricing, rates = config.rates.len(), "Config loaded");

    let digits = config.fraction_digits();

    match cli.command {
        Command::Price { input, date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let request: PriceRequest = commands::read_json(&input)?;
            let report = commands::price(request, &config, date)?;
            emit(cli.json, &report, || {
                PriceView {
                    report: &report,
                    digits,
                }
                .to_string()
            })
        }
        Command::Invoice { input } => {
            let request: InvoiceRequest = commands::read_json(&input)?;
            let invoice = commands::invoice(&request, &config);
            emit(cli.json, &invoice, || {
                InvoiceView {
                    invoice: &invoice,
                    digits,
                }
                .to_string()
            })
        }
        Command::ValidateCharge {
            charge_type,
            value,
            kind,
        } => {
            let check = commands::validate_charge(&charge_type, value, kind.map(Into::into));
            emit(cli.json, &check, || check.to_string())
        }
        Command::CheckCategory { code } => {
            commands::check_category(&code, &config)?;
            println!("{} can be deleted", code.trim());
            Ok(())
        }
    }
}

/// Prints `value` as pretty JSON, or the text rendering.
fn emit<T, F>(json: bool, value: &T, text: F) -> CliResult<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        let text = text();
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

/// Initializes tracing on stderr so stdout stays clean for reports.
///
/// ## Log Levels
/// - ERROR: command failures
/// - WARN: degraded inputs (unknown charge codes, failed validation)
/// - INFO: config file and command summaries
/// - DEBUG: per-line results
/// - TRACE: every price computation
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,swarna=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
