use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::audience::AudienceLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::audience::Audience;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Audience { selector, count } = cmd {
        let audience = Audience::from_code(selector)
            .ok_or_else(|| AppError::InvalidAudience(selector.clone()))?;

        let mut pool = DbPool::new(&cfg.database)?;
        let recipients = AudienceLogic::resolve(&pool.conn, audience)?;

        if *count {
            println!("{}", recipients.len());
            return Ok(());
        }

        if recipients.is_empty() {
            info(format!(
                "Audience '{}' currently has no recipients.",
                audience.to_db_str()
            ));
            return Ok(());
        }

        println!(
            "{CYAN}📣 {} recipient(s) for '{}':{RESET}\n",
            recipients.len(),
            audience.to_db_str()
        );
        for email in &recipients {
            println!("• {}", email);
        }
    }

    Ok(())
}
