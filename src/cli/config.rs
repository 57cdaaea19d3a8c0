//! CLI commands for settings: showing the configuration and the theme toggle

use crate::error::ExpenseResult;
use crate::session::Session;

/// Show paths and settings in effect
pub fn handle_config_command(session: &Session) -> ExpenseResult<()> {
    let paths = session.paths();
    let settings = session.settings();

    println!("Expense Tracker Configuration");
    println!("=============================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!(
        "Data file:        {}",
        session
            .data_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!("Loaded from:      {}", session.source_label());
    if let Some(reason) = session.load_error() {
        println!("Load error:       {}", reason);
    }
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Theme:           {}", settings.theme);
    println!("  Top groups:      {}", settings.top_groups);
    Ok(())
}

/// Switch between the light and dark theme
pub fn handle_theme_command(session: &mut Session) -> ExpenseResult<()> {
    let theme = session.toggle_theme()?;
    println!("Theme set to {}", theme);
    Ok(())
}
