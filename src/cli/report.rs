//! CLI command for the dashboard report
//!
//! Renders every chart input for the filtered view, either to the terminal
//! or as a CSV, JSON or YAML export.

use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{write_dashboard, ReportFormat};
use crate::session::Session;

use super::filter::FilterArgs;

/// Report options
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format: text, csv, json or yaml
    #[arg(short, long, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Write to a file instead of stdout; a bare file name goes to the
    /// export directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show top N groups per ranking (text format only)
    #[arg(long)]
    pub top: Option<usize>,
}

/// Place a bare file name in the export directory
fn resolve_output(paths: &ExpensePaths, output: &Path) -> ExpenseResult<PathBuf> {
    let bare = output.is_relative()
        && output
            .parent()
            .map_or(true, |parent| parent.as_os_str().is_empty());
    if !bare {
        return Ok(output.to_path_buf());
    }
    paths.ensure_directories()?;
    Ok(paths.export_dir().join(output))
}

/// Handle the report command
pub fn handle_report_command(session: &Session, args: &ReportArgs) -> ExpenseResult<()> {
    session.require_data()?;
    let spec = args.filter.to_spec()?;
    let dashboard = session.dashboard(&spec)?;
    let settings = session.settings();
    let top = args.top.unwrap_or(settings.top_groups);

    if let Some(output) = &args.output {
        let path = resolve_output(session.paths(), output)?;
        let file = File::create(&path).map_err(|e| {
            ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        write_dashboard(
            &dashboard,
            args.format,
            &settings.currency_symbol,
            top,
            &mut writer,
        )?;
        writer
            .flush()
            .map_err(|e| ExpenseError::Export(format!("Failed to flush report: {}", e)))?;
        println!(
            "Report ({}) exported to: {}",
            args.format,
            path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_dashboard(
            &dashboard,
            args.format,
            &settings.currency_symbol,
            top,
            &mut handle,
        )?;
    }

    Ok(())
}
