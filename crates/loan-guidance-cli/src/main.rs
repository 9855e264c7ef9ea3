mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{PaymentArgs, ScheduleArgs};
use commands::guidance::{AnalyzeArgs, RecommendArgs};

/// Loan amortization and affordability guidance
#[derive(Parser)]
#[command(
    name = "loan",
    version,
    about = "Loan amortization schedules and affordability guidance",
    long_about = "Computes level monthly payments and full amortization schedules with \
                  decimal precision, and produces affordability ratios, a risk \
                  classification and narrative guidance for a loan scenario."
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
    /// Calculate the level monthly payment
    Payment(PaymentArgs),
    /// Build the month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Analyse affordability and risk for a loan application
    Analyze(AnalyzeArgs),
    /// Narrative recommendations for a loan application
    Recommend(RecommendArgs),
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
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Analyze(args) => commands::guidance::run_analyze(args),
        Commands::Recommend(args) => commands::guidance::run_recommend(args),
        Commands::Version => {
            println!("loan {}", env!("CARGO_PKG_VERSION"));
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
