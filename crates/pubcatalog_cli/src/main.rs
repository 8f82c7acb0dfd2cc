//! `pubcatalog` terminal front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and load the catalog once.
//! - Translate command-line input into catalog `Action`s and print views.
//!
//! # Invariants
//! - A failed load prints the user-facing message and exits non-zero.
//! - Core state is only touched through `CatalogState::dispatch`.

mod commands;
mod error;
mod repl;
mod source;

use clap::{Args, Parser, Subcommand, ValueEnum};
use error::CliError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pubcatalog", version, about = "Browse a publication catalog")]
pub(crate) struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read publications from a JSON fixture instead of the configured source.
    #[arg(long, global = true, conflicts_with = "sqlite")]
    fixture: Option<PathBuf>,

    /// Read publications from a SQLite snapshot instead of the configured source.
    #[arg(long, global = true)]
    sqlite: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one page of results.
    Browse(BrowseArgs),

    /// List selectable domain, system and year values.
    Facets,

    /// Print catalog counters.
    Stats,

    /// Browse interactively with line commands.
    Interactive {
        /// Apply search and filters together.
        #[arg(long)]
        compose: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Copy a JSON fixture into a SQLite snapshot.
    Import {
        /// JSON fixture holding an array of documents.
        #[arg(long)]
        from: PathBuf,

        /// Snapshot database file, created when missing.
        #[arg(long)]
        into: PathBuf,
    },
}

#[derive(Args)]
pub(crate) struct BrowseArgs {
    /// Free-text search over title, abstract and findings.
    #[arg(long)]
    search: Option<String>,

    /// Research domain tag, e.g. `space_biology`.
    #[arg(long)]
    domain: Option<String>,

    /// Biological system tag.
    #[arg(long)]
    system: Option<String>,

    #[arg(long)]
    year: Option<i64>,

    #[arg(long, default_value = "1")]
    page: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Apply search and filters together.
    #[arg(long)]
    compose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Html,
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = source::resolve_config(&cli)?;
    source::start_logging(&cli, &config)?;

    match cli.command {
        Command::Browse(args) => commands::browse(&config, &args),
        Command::Facets => commands::facets(&config),
        Command::Stats => commands::stats(&config),
        Command::Interactive { compose, format } => commands::interactive(&config, compose, format),
        Command::Import { from, into } => commands::import(&config, &from, &into),
    }
}
