//! CLI command for the audit history

use crate::error::ExpenseResult;
use crate::session::Session;

/// Show the most recent audit entries, oldest first
pub fn handle_history_command(session: &Session, count: usize) -> ExpenseResult<()> {
    let entries = session.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
