mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::lenders::{CompareArgs, LendersArgs, QuoteArgs};
use commands::loan::CalculateArgs;
use commands::schedule::ScheduleArgs;

/// Home loan EMI calculator
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Home loan EMI calculator and lender comparison",
    long_about = "Computes equated monthly installments for fixed-rate home loans with \
                  decimal precision. Supports single-loan calculation, side-by-side lender \
                  comparison, per-lender quotes, and month-by-month repayment schedules."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate EMI, total interest and processing fee for one loan
    Calculate(CalculateArgs),
    /// Compare EMI across lenders for the same principal and tenure
    Compare(CompareArgs),
    /// Quote a single lender by name
    Quote(QuoteArgs),
    /// List the lender catalog
    Lenders(LendersArgs),
    /// Build a month-by-month repayment schedule
    Schedule(ScheduleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::loan::run_calculate(args),
        Commands::Compare(args) => commands::lenders::run_compare(args),
        Commands::Quote(args) => commands::lenders::run_quote(args),
        Commands::Lenders(args) => commands::lenders::run_lenders(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
