mod config;
mod dispatch;
mod error;
mod render;

use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{ArgAction, Args, Parser, Subcommand};
use stockroom_agent::{API_KEY_ENV, AgentConfig, Interpreter};
use stockroom_core::{FailureKind, ItemPatch};
use stockroom_sqlite::ItemStore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::StockroomConfig;
use crate::dispatch::execute;
use crate::error::{CliError, Result};
use crate::render::{ListFormat, import_summary, render_outcome, row_failure};

const DEFAULT_EXPORT_FILE: &str = "inventory_export.csv";

#[derive(Debug, Parser)]
#[command(name = "stockroom", version)]
#[command(about = "Small-shop inventory kept in a local SQLite file")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, env = "STOCKROOM_DB", default_value = "inventory.db")]
    db: PathBuf,
    /// Optional YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new item.
    Add(AddArgs),
    /// Subtract a positive amount from an item's quantity.
    Subtract(SubtractArgs),
    /// Change some fields of an existing item.
    Update(UpdateArgs),
    /// Remove an item.
    Delete(DeleteArgs),
    /// Show all items, or one item by SKU.
    List(ListArgs),
    /// Load items from a CSV file, overwriting existing SKUs.
    ImportCsv(ImportArgs),
    /// Write every item to a CSV file.
    ExportCsv(ExportArgs),
    /// Run a free-text instruction such as "add 20 bananas with sku B300 price 90".
    Agent(AgentArgs),
}

// Numeric arguments accept negative values; the store is the one that rejects them.

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    sku: String,
    #[arg(long)]
    name: String,
    #[arg(long, allow_negative_numbers = true)]
    qty: i64,
    #[arg(long, allow_negative_numbers = true)]
    price: f64,
}

#[derive(Debug, Args)]
struct SubtractArgs {
    #[arg(long)]
    sku: String,
    /// Amount to subtract (must be > 0).
    #[arg(long, allow_negative_numbers = true)]
    qty: i64,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[arg(long)]
    sku: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    qty: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    price: Option<f64>,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    #[arg(long)]
    sku: String,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Show only this SKU (fails if it does not exist).
    #[arg(long)]
    sku: Option<String>,
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    format: ListFormat,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// CSV file with a `sku,name,quantity,price` header.
    #[arg(long)]
    file: PathBuf,
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
    file: PathBuf,
}

#[derive(Debug, Args)]
struct AgentArgs {
    /// The instruction; several words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
    /// Use only the keyword rules, even when a service key is set.
    #[arg(long)]
    offline: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => exit_usage(err),
    };
    setup_logging(cli.verbose);

    if let Err(err) = run(cli) {
        let kind = err.kind();
        eprintln!("error[{kind}]: {err}");
        std::process::exit(kind.exit_code());
    }
}

/// Help and version output go through clap untouched. Any other usage error
/// is reported as `InvalidValue`, like a failed command.
fn exit_usage(err: clap::Error) -> ! {
    let Some(kind) = usage_failure_kind(err.kind()) else {
        err.exit()
    };
    let rendered = err.render().to_string();
    let message = rendered.trim().trim_start_matches("error: ");
    eprintln!("error[{kind}]: {message}");
    std::process::exit(kind.exit_code());
}

fn usage_failure_kind(kind: ErrorKind) -> Option<FailureKind> {
    match kind {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        _ => Some(FailureKind::InvalidValue),
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`.
fn setup_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = StockroomConfig::load_or_default(cli.config.as_deref())?;
    let agent_config = AgentConfig::new(config.agent, std::env::var(API_KEY_ENV).ok());
    debug!(db = %cli.db.display(), "opening store");
    let store = ItemStore::open(&cli.db)?;

    match cli.command {
        Command::Add(args) => run_command(
            &store,
            &stockroom_core::Command::Add {
                sku: args.sku,
                name: args.name,
                quantity: args.qty,
                price: args.price,
            },
            ListFormat::Table,
        ),
        Command::Subtract(args) => run_command(
            &store,
            &stockroom_core::Command::Subtract {
                sku: args.sku,
                quantity: args.qty,
            },
            ListFormat::Table,
        ),
        Command::Update(args) => run_command(
            &store,
            &stockroom_core::Command::Update {
                sku: args.sku,
                patch: ItemPatch {
                    name: args.name,
                    quantity: args.qty,
                    price: args.price,
                },
            },
            ListFormat::Table,
        ),
        Command::Delete(args) => run_command(
            &store,
            &stockroom_core::Command::Delete { sku: args.sku },
            ListFormat::Table,
        ),
        Command::List(args) => run_command(
            &store,
            &stockroom_core::Command::List { sku: args.sku },
            args.format,
        ),
        Command::ImportCsv(args) => run_import(&store, &args.file),
        Command::ExportCsv(args) => run_export(&store, &args.file),
        Command::Agent(args) => run_agent(&store, agent_config.offline(args.offline), &args.text),
    }
}

fn run_command(
    store: &ItemStore,
    command: &stockroom_core::Command,
    format: ListFormat,
) -> Result<()> {
    let outcome = execute(store, command)?;
    println!("{}", render_outcome(&outcome, format)?);
    Ok(())
}

fn run_import(store: &ItemStore, file: &Path) -> Result<()> {
    let report = stockroom_interchange::import_file(store, file)?;
    println!("{}", import_summary(&report));
    if report.is_clean() {
        return Ok(());
    }

    for failure in &report.failures {
        eprintln!("{}", row_failure(failure));
    }
    Err(CliError::ImportIncomplete {
        failed: report.failures.len(),
        total: report.imported + report.failures.len(),
    })
}

fn run_export(store: &ItemStore, file: &Path) -> Result<()> {
    let written = stockroom_interchange::export_file(store, file)?;
    println!("Exported {written} row(s) to {}", file.display());
    Ok(())
}

fn run_agent(store: &ItemStore, agent_config: AgentConfig, words: &[String]) -> Result<()> {
    let interpreter = Interpreter::from_config(&agent_config);

    let text = words.join(" ");
    let interpretation = interpreter.interpret(&text)?;
    info!(
        source = ?interpretation.source,
        verb = %interpretation.command.verb(),
        "running interpreted command"
    );
    run_command(store, &interpretation.command, ListFormat::Table)
}
