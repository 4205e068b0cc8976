mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use crate::commands::{
    EntryFields, ExportFormat, cmd_add, cmd_clear, cmd_copy, cmd_day, cmd_delete, cmd_edit,
    cmd_export, cmd_goals_set, cmd_goals_show, cmd_history, cmd_import, cmd_presets,
};
use crate::config::Config;
use macrolog_core::db::Database;
use macrolog_core::tracker::Tracker;

#[derive(Parser)]
#[command(
    name = "macrolog",
    version,
    about = "A local-first food log with calorie and macro goals"
)]
struct Cli {
    /// Directory holding the database (default: the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a food entry
    Add {
        #[command(flatten)]
        fields: EntryFields,
        /// Prefill from a quick-add preset (see `macrolog presets`)
        #[arg(short, long)]
        preset: Option<String>,
        /// Date to log for (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an entry; only the given fields change
    Edit {
        /// Entry ID
        id: String,
        #[command(flatten)]
        fields: EntryFields,
        /// Move the entry to another date
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry by ID
    Delete {
        /// Entry ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a day's entries, totals, and progress toward goals (default: today)
    Day {
        /// Date to show (YYYY-MM-DD or today/yesterday/tomorrow)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Copy every entry from one day onto another
    Copy {
        /// Source date (default: the day before --to)
        #[arg(long)]
        from: Option<String>,
        /// Destination date (default: today)
        #[arg(long)]
        to: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every entry on a day (default: today)
    Clear {
        /// Date to clear (YYYY-MM-DD or today/yesterday/tomorrow)
        date: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change daily goals
    Goals {
        #[command(subcommand)]
        command: GoalsCommands,
    },
    /// Show per-day totals, newest first
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the whole log as CSV or JSON
    Export {
        /// Export format
        #[arg(value_enum)]
        format: ExportFormat,
        /// Write to this file or directory instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Report the written file as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the whole log with a JSON export
    Import {
        /// Path to a JSON file produced by `macrolog export json`
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List quick-add presets
    Presets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum GoalsCommands {
    /// Show current goals
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set goals; fields not given keep their current value
    Set {
        /// Daily calories (kcal)
        #[arg(long)]
        calories: Option<f64>,
        /// Daily protein (g)
        #[arg(long)]
        protein: Option<f64>,
        /// Daily carbs (g)
        #[arg(long)]
        carbs: Option<f64>,
        /// Daily fat (g)
        #[arg(long)]
        fat: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MACROLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.data_dir.as_deref())?;
    debug!(data_dir = %config.data_dir.display(), "using data directory");
    let db = Database::open(&config.db_path)
        .with_context(|| format!("Failed to open database at {}", config.db_path.display()))?;
    let mut tracker = Tracker::new(db);

    match cli.command {
        Commands::Add {
            fields,
            preset,
            date,
            json,
        } => cmd_add(&mut tracker, fields, preset.as_deref(), date, json),
        Commands::Edit {
            id,
            fields,
            date,
            json,
        } => cmd_edit(&mut tracker, &id, fields, date, json),
        Commands::Delete { id, yes, json } => cmd_delete(&mut tracker, &id, yes, json),
        Commands::Day { date, json } => cmd_day(&mut tracker, date, json),
        Commands::Copy { from, to, json } => cmd_copy(&mut tracker, from, to, json),
        Commands::Clear { date, yes, json } => cmd_clear(&mut tracker, date, yes, json),
        Commands::Goals { command } => match command {
            GoalsCommands::Show { json } => cmd_goals_show(&tracker, json),
            GoalsCommands::Set {
                calories,
                protein,
                carbs,
                fat,
                json,
            } => cmd_goals_set(&mut tracker, calories, protein, carbs, fat, json),
        },
        Commands::History { json } => cmd_history(&tracker, json),
        Commands::Export {
            format,
            output,
            json,
        } => cmd_export(&tracker, format, output.as_deref(), json),
        Commands::Import { file, json } => cmd_import(&mut tracker, &file, json).await,
        Commands::Presets { json } => cmd_presets(json),
    }
}
