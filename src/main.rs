use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use expense_tracker::cli::{
    handle_add_command, handle_config_command, handle_history_command, handle_import_command,
    handle_list_command, handle_remove_command, handle_report_command, handle_stats_command,
    handle_theme_command, AddArgs, FilterArgs, ReportArgs,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::log::init_logging;
use expense_tracker::session::Session;

#[derive(Parser)]
#[command(
    name = "expenses",
    author = "Kaylee Beyene",
    version,
    about = "Filter, aggregate and summarize expense records",
    long_about = "Loads expense records from a CSV file and answers questions about \
                  them: filtered listings, totals by category and payment method, \
                  month/day breakdowns and summary metrics."
)]
struct Cli {
    /// Print diagnostic logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this CSV file for this run instead of the configured one
    #[arg(long, global = true, env = "EXPENSE_TRACKER_DATA_FILE")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List expenses matching the filters
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Add an expense
    Add(AddArgs),

    /// Remove an expense by its row number (as shown by `list`)
    #[command(alias = "rm")]
    Remove {
        /// Row number
        row: usize,
    },

    /// Show total, average and highest expense
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show or export the dashboard: summary, groupings, trend and heatmap
    Report(ReportArgs),

    /// Replace the expenses with the contents of a CSV file
    Import {
        /// Path to CSV file
        file: PathBuf,

        /// Use the file itself as the data file from now on
        #[arg(long)]
        link: bool,
    },

    /// Toggle between the light and dark theme
    Theme,

    /// Show current configuration and paths
    Config,

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    if let Some(data_file) = &cli.data_file {
        debug!(path = %data_file.display(), "data file overridden for this run");
    }

    let mut session = Session::open_with_data_file(paths, settings, cli.data_file)?;

    match cli.command {
        Some(Commands::List { filter }) => handle_list_command(&session, &filter)?,
        Some(Commands::Add(args)) => handle_add_command(&mut session, &args)?,
        Some(Commands::Remove { row }) => handle_remove_command(&mut session, row)?,
        Some(Commands::Stats { filter }) => handle_stats_command(&session, &filter)?,
        Some(Commands::Report(args)) => handle_report_command(&session, &args)?,
        Some(Commands::Import { file, link }) => {
            handle_import_command(&mut session, &file, link)?
        }
        Some(Commands::Theme) => handle_theme_command(&mut session)?,
        Some(Commands::Config) => handle_config_command(&session)?,
        Some(Commands::History { count }) => handle_history_command(&session, count)?,
        None => {
            if let Some(reason) = session.load_error() {
                println!("Warning: data file could not be loaded: {}", reason);
                println!("Run 'expenses import <file>' to replace it.");
            }
            println!("Expense Tracker - {} expenses loaded", session.collection().len());
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses report' to see the dashboard.");
        }
    }

    Ok(())
}
