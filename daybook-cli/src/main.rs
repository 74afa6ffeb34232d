mod commands;
mod render;

use anyhow::{Context, Result};
use chrono::Weekday;
use clap::{Parser, Subcommand};
use daybook_core::config::DaybookConfig;
use daybook_core::{EventId, GridPadding};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "A month calendar with timed events for each day")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid and the events of the selected day
    Show {
        /// Month to display (YYYY-MM), defaults to the selected day's month
        #[arg(short, long)]
        month: Option<String>,

        /// Selected day (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Move this many months forward
        #[arg(long, default_value_t = 0)]
        next: u32,

        /// Move this many months back
        #[arg(long, default_value_t = 0)]
        prev: u32,
    },
    /// Add an event (prompts for anything not given)
    Add {
        name: Option<String>,

        /// Day of the event (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// List the events of a day with their ids
    Events {
        /// Day to list (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an event by id
    Delete { id: EventId },
    /// Show paths and settings, or change settings
    Config {
        /// First column of the grid, any weekday (sunday, mon, ...)
        #[arg(long)]
        week_start: Option<Weekday>,

        /// month-end or full-weeks
        #[arg(long)]
        grid_padding: Option<GridPadding>,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = DaybookConfig::load().context("Failed to load daybook config")?;

    match cli.command {
        Commands::Show {
            month,
            date,
            next,
            prev,
        } => commands::show::run(&config, month.as_deref(), date.as_deref(), next, prev),
        Commands::Add {
            name,
            date,
            start,
            end,
            description,
        } => commands::add::run(&config, name, date, start, end, description),
        Commands::Events { date } => commands::events::run(&config, date.as_deref()),
        Commands::Delete { id } => commands::delete::run(&config, id),
        Commands::Config {
            week_start,
            grid_padding,
        } => commands::config::run(config, week_start, grid_padding),
    }
}

/// Log to stderr, filtered by `DAYBOOK_LOG` (e.g. `DAYBOOK_LOG=debug`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("DAYBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
