use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::booking::BookingLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Attend { booking, undo } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        BookingLogic::mark_attended(&mut pool, booking, !*undo)?;

        if *undo {
            success(format!("Attendance revoked for booking {}.", booking));
        } else {
            success(format!("Booking {} marked as attended.", booking));
        }
    }

    Ok(())
}
