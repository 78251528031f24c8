use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::db::pool::DbPool;
use crate::db::sessions;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, cascade, yes } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let session = sessions::load_session(&pool.conn, id)?;

        //
        // Confirmation prompt
        //
        let prompt = if *cascade {
            format!(
                "Delete '{}' ({}) AND all of its bookings? This action is irreversible.",
                session.title,
                session.date_str()
            )
        } else {
            format!(
                "Delete '{}' ({})? This action is irreversible.",
                session.title,
                session.date_str()
            )
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        CatalogLogic::delete(&mut pool, id, *cascade)?;

        success(format!("Session '{}' has been deleted.", session.title));
    }

    Ok(())
}
