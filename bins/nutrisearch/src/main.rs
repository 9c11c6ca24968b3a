//! nutrisearch - food search over USDA FoodData Central
//!
//! Ranked keyword search and single-food lookups from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use nutrisearch_api_client::{ApiError, ClientConfig};
use nutrisearch_core::config::Config;
use nutrisearch_core::error::exit_codes;
use nutrisearch_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

mod commands;

use commands::{details, search, show_config};

/// Food search over USDA FoodData Central
#[derive(Parser)]
#[command(name = "nutrisearch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to nutrisearch.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored when the terminal supports it
    Text,
    /// The service's JSON shape on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search foods by keyword
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Results per page (configured default if omitted)
        #[arg(short = 'n', long)]
        page_size: Option<u32>,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Print collected metrics to stderr afterwards
        #[arg(long)]
        metrics: bool,
    },

    /// Show one food with its full nutrient set
    Details {
        /// FoodData Central id (`171688` or `fdc_171688`)
        fdc_id: String,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::from(exit_codes::CONFIG_ERROR);
        }
    };

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig {
            log_level: loaded.schema.logging.level.clone(),
            json: loaded.schema.logging.json,
            ..TelemetryConfig::default()
        }
    };
    if let Err(e) = nutrisearch_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let client_config = match ClientConfig::from_schema(&loaded.schema) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::from(exit_codes::CONFIG_ERROR);
        }
    };

    debug!(
        source = ?loaded.path,
        mode = ?client_config.mode(),
        "Configuration resolved"
    );

    let result = match cli.command {
        Commands::Search {
            query,
            page_size,
            page,
            metrics,
        } => {
            search::run(
                client_config,
                &query.join(" "),
                page_size.unwrap_or(0),
                page,
                metrics,
                cli.format,
            )
            .await
        }

        Commands::Details { fdc_id } => details::run(client_config, &fdc_id, cli.format).await,

        Commands::Config => show_config::run(&loaded, &client_config, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Config(_)) => exit_codes::CONFIG_ERROR,
        _ => exit_codes::FAILURE,
    }
}
