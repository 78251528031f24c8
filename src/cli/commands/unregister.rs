use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::booking::BookingLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::role::ActivityRole;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Unregister {
        session,
        email,
        role,
    } = cmd
    {
        let role = match role {
            Some(r) => {
                ActivityRole::ar_from_str(r).ok_or_else(|| AppError::InvalidRole(r.clone()))?
            }
            None => ActivityRole::Attendee,
        };

        let mut pool = DbPool::new(&cfg.database)?;

        BookingLogic::unregister(&mut pool, email, session, role)?;

        success(format!(
            "Unregistered {} ({}) from session {}.",
            email,
            role.to_db_str(),
            session
        ));
    }

    Ok(())
}
