use clap::{Parser, Subcommand};

mod commands;
mod config;

mod errors;
use commands::init_cmd::{self, InitArgs};
use commands::run_cmd::{self, summary_line, RunArgs};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// ClinicCheck CLI: end-to-end smoke checks against a clinic-management API
#[derive(Parser)]
#[command(name = "clinic-check")]
#[command(about = "Run end-to-end smoke checks against a clinic-management API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the end-to-end check flow
    Run(RunArgs),

    /// Write a default configuration file
    Init(InitArgs),

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    // Initialize logging; default to info so the step-by-step report is
    // visible without configuration.
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_env("CLINIC_CHECK_LOG")
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Run(args) => match run_cmd::execute(args).await {
            Ok(outcome) => {
                println!("{}", summary_line(outcome.report.verification));
                if outcome.passed {
                    std::process::exit(0);
                } else {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                error!("Check crashed: {e}");
                std::process::exit(1);
            }
        },
        Commands::Init(args) => match init_cmd::execute(args) {
            Ok(path) => {
                println!("Wrote default configuration to {:?}", path);
                std::process::exit(0);
            }
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Version => {
            // Print version info from baked-in value
            println!(
                "clinic-check version {}",
                option_env!("CLINIC_CHECK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            std::process::exit(0);
        }
    }
}
