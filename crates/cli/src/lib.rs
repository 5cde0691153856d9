pub mod commands;
pub mod render;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shortlist_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use shortlist_core::ApplicationError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "shortlist",
    about = "Search, rank and compare catalog products",
    long_about = "Search the product catalog with ranked suggestions, build a comparison list, and see similar products.",
    after_help = "Examples:\n  shortlist search iphone\n  shortlist compare 4 6 --json\n  shortlist repl"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file to load instead of ./shortlist.toml")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Catalog file to use instead of the built-in catalog")]
    catalog: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[arg(long, global = true, help = "Log format (compact|pretty|json)")]
    log_format: Option<LogFormat>,
    #[arg(long, global = true, help = "Maximum number of search suggestions")]
    max_suggestions: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List the catalog ordered by composite score")]
    Catalog {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Show ranked suggestions for a search query")]
    Search {
        query: String,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Show products similar to the given product id")]
    Similar {
        id: u32,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Select products by id, in order, and show the comparison")]
    Compare {
        #[arg(required = true)]
        ids: Vec<u32>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Interactive session: type queries, select and remove products")]
    Repl,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate configuration and catalog readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                catalog_path: self.catalog.clone(),
                log_level: self.log_level.clone(),
                log_format: self.log_format,
                max_suggestions: self.max_suggestions,
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();

    let result = match cli.command {
        Command::Catalog { json } => {
            with_config(options, "catalog", |config| commands::catalog::run(config, json))
        }
        Command::Search { query, json } => {
            with_config(options, "search", |config| commands::search::run(config, &query, json))
        }
        Command::Similar { id, json } => {
            with_config(options, "similar", |config| commands::similar::run(config, id, json))
        }
        Command::Compare { ids, json } => {
            with_config(options, "compare", |config| commands::compare::run(config, &ids, json))
        }
        Command::Repl => with_config(options, "repl", commands::repl::run),
        Command::Config => commands::config::run(options),
        Command::Doctor { json } => commands::doctor::run(json, options),
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}

fn with_config(
    options: LoadOptions,
    command: &str,
    run: impl FnOnce(&AppConfig) -> commands::CommandResult,
) -> commands::CommandResult {
    match AppConfig::load(options) {
        Ok(config) => {
            if let Err(error) = init_logging(&config) {
                eprintln!("shortlist: logging disabled: {error}");
            }
            tracing::debug!(event_name = "cli.command_started", command, "running command");
            run(&config)
        }
        Err(error) => commands::CommandResult::from_error(command, &ApplicationError::from(error)),
    }
}

fn init_logging(config: &AppConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    // stdout carries command output, so logs go to stderr
    match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}
