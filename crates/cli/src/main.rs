// truckstock CLI - reconcile truck inventory against stock templates

mod analyze;
mod config;
mod exit_codes;
mod template;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use truckstock_io::{DirTemplateStore, FileConsumableRegistry, FileTruckRegistry, InputError, StoreError, Truck};
use truckstock_recon::{ConsumableCodes, ReconError, Registry, RegistryCache};

use crate::analyze::AnalyzeArgs;
use crate::config::{AppConfig, ConfigError};
use crate::exit_codes::{
    EXIT_CONFIG, EXIT_EMPTY_INPUT, EXIT_EXPORT, EXIT_INPUT, EXIT_STORE, EXIT_SUCCESS, EXIT_USAGE,
};
use crate::template::TemplateCommands;

#[derive(Parser)]
#[command(name = "truckstock")]
#[command(about = "Reconcile truck on-hand inventory against stock templates")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Config file (default: <config dir>/truckstock/config.toml)
    #[arg(long, global = true, env = "TRUCKSTOCK_CONFIG")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify on-hand inventory against a template
    #[command(after_help = "\
Examples:
  truckstock analyze --template hvac.xlsx --on-hand truck7.xlsx
  truckstock analyze --template-id 5f0c... --on-hand truck7.csv --json
  truckstock analyze --template hvac.xlsx --on-hand truck7.xlsx --report truck7.txt
  truckstock analyze --template hvac.xlsx --on-hand truck7.xlsx --report-xlsx truck7-report.xlsx
  truckstock analyze --template hvac.xlsx --on-hand truck7.xlsx --adjustments . --truck T-7")]
    Analyze(AnalyzeArgs),

    /// Manage stored templates
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },

    /// List active trucks from the truck registry
    #[command(after_help = "\
Examples:
  truckstock trucks
  truckstock trucks --json")]
    Trucks {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  truckstock-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: truckstock <command> [options]");
            eprintln!("       truckstock --help for more information");
            Ok(())
        }
        Some(command) => Context::load(cli.config).and_then(|ctx| match command {
            Commands::Analyze(args) => analyze::cmd_analyze(&ctx, args),
            Commands::Template { command } => template::cmd_template(&ctx, command),
            Commands::Trucks { json } => cmd_trucks(&ctx, json),
        }),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// `-v`/`-vv` win; otherwise `TRUCKSTOCK_LOG`, otherwise warnings only.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("TRUCKSTOCK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::new(EXIT_EXPORT, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<InputError> for CliError {
    fn from(err: InputError) -> Self {
        let hint = match &err {
            InputError::UnsupportedFormat { .. } => Some("save the sheet as .xlsx or .csv".to_string()),
            _ => None,
        };
        Self { code: EXIT_INPUT, message: err.to_string(), hint }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        let hint = match &err {
            StoreError::NotFound(_) => Some("list stored templates with `truckstock template list`".to_string()),
            _ => None,
        };
        Self { code: EXIT_STORE, message: err.to_string(), hint }
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        let hint = match &err {
            ReconError::EmptyTemplate => "the template needs an 'ITEM CODE' column with at least one code",
            ReconError::EmptyOnHand => "the on-hand export needs an 'Item Code' column with at least one code",
        };
        Self::new(EXIT_EMPTY_INPUT, err.to_string()).with_hint(hint)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::new(EXIT_CONFIG, err.to_string())
    }
}

// ============================================================================
// Shared command context
// ============================================================================

/// Config plus the registry caches every command shares.
pub struct Context {
    pub config: AppConfig,
    consumables: RegistryCache<ConsumableCodes>,
    trucks: RegistryCache<Vec<Truck>>,
}

impl Context {
    fn load(config_path: Option<PathBuf>) -> Result<Self, CliError> {
        let config = AppConfig::load(config_path.as_deref())?;
        Ok(Self {
            config,
            consumables: RegistryCache::new(),
            trucks: RegistryCache::new(),
        })
    }

    pub fn store(&self) -> DirTemplateStore {
        let dir = self.config.store.dir.clone().unwrap_or_else(DirTemplateStore::default_dir);
        DirTemplateStore::new(dir)
    }

    pub fn consumable_codes(&self) -> Arc<ConsumableCodes> {
        let registry = self.config.registry.consumables.as_ref().map(FileConsumableRegistry::new);
        self.consumables
            .get_or_fetch(registry.as_ref().map(|r| r as &dyn Registry<ConsumableCodes>))
    }

    pub fn trucks(&self) -> Arc<Vec<Truck>> {
        let registry = self.config.registry.trucks.as_ref().map(FileTruckRegistry::new);
        self.trucks
            .get_or_fetch(registry.as_ref().map(|r| r as &dyn Registry<Vec<Truck>>))
    }
}

// ============================================================================
// trucks
// ============================================================================

fn cmd_trucks(ctx: &Context, json: bool) -> Result<(), CliError> {
    let trucks = ctx.trucks();

    if json {
        let out = serde_json::to_string_pretty(trucks.as_ref())
            .map_err(|e| CliError::export(format!("JSON serialization error: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    if trucks.is_empty() {
        eprintln!("no active trucks");
        return Ok(());
    }

    println!("{:<12} {:<30} {}", "TRUCK", "DESCRIPTION", "TECH");
    for truck in trucks.iter() {
        println!(
            "{:<12} {:<30} {}",
            truck.truck_number,
            truck.description,
            truck.current_tech.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
