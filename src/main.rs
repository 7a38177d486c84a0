mod commands;
mod dates;
mod form;
mod prompt;
mod render;

use std::path::PathBuf;

use agenda_core::config::AgendaConfig;
use agenda_core::controller::Agenda;
use agenda_core::slot::FileStore;
use agenda_core::store::EventStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::form::EventArgs;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Schedule appointments in a month calendar, with no double bookings")]
struct Cli {
    /// Read configuration from this file instead of ~/.config/agenda/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid (defaults to the current month)
    Month {
        /// Month to show (YYYY-MM)
        month: Option<String>,
    },
    /// List the events of one day
    Day {
        /// Date (YYYY-MM-DD, "today" or "tomorrow"); defaults to today
        date: Option<String>,
    },
    /// List every stored event
    List,
    /// Create an event
    New {
        /// Date (YYYY-MM-DD, "today" or "tomorrow"); defaults to today
        date: Option<String>,

        #[command(flatten)]
        fields: EventArgs,
    },
    /// Edit an event
    Edit {
        /// Event id (a unique prefix is enough)
        id: String,

        /// Move the event to this date
        #[arg(long)]
        date: Option<String>,

        #[command(flatten)]
        fields: EventArgs,
    },
    /// Delete an event
    Delete {
        /// Event id (a unique prefix is enough)
        id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Export all events as an .ics calendar
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Calendar name embedded in the export
        #[arg(long, default_value = "Agenda")]
        name: String,
    },
    /// Replace all events with the contents of a JSON file
    Import {
        /// JSON array of events, in the same format the store uses
        file: PathBuf,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut agenda = open_agenda(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Month { month: None }) {
        Commands::Month { month } => commands::month::run(&mut agenda, month.as_deref()),
        Commands::Day { date } => commands::day::run(&agenda, date.as_deref()),
        Commands::List => commands::list::run(&agenda),
        Commands::New { date, fields } => commands::new::run(&mut agenda, date.as_deref(), fields),
        Commands::Edit { id, date, fields } => {
            commands::edit::run(&mut agenda, &id, date.as_deref(), fields)
        }
        Commands::Delete { id, yes } => commands::delete::run(&mut agenda, &id, yes),
        Commands::Export { output, name } => commands::export::run(&agenda, output.as_deref(), &name),
        Commands::Import { file, yes } => commands::import::run(&mut agenda, &file, yes),
    }
}

/// Logs go to stderr. AGENDA_LOG takes precedence over --verbose.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("AGENDA_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_agenda(config_path: Option<&std::path::Path>) -> Result<Agenda<FileStore>> {
    let config = match config_path {
        Some(path) => AgendaConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AgendaConfig::load().context("Failed to load config")?,
    };

    let slot = config.file_store()?;
    tracing::debug!("Using slot '{}' in {}", config.storage_key, slot.dir().display());

    let today = dates::today();
    let store = EventStore::load(slot, config.storage_key, today);
    Ok(Agenda::new(store, today))
}
