use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Feature { id, clear } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        if *clear {
            CatalogLogic::clear_featured(&mut pool, id)?;
            success("Featured flag cleared.");
        } else {
            let session = CatalogLogic::set_featured(&mut pool, id)?;
            success(format!("'{}' is now the featured session.", session.title));
        }
    }

    Ok(())
}
