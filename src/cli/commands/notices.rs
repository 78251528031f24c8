use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::notify::NotifyLogic;
use crate::db::notifications;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Notices {
        recipient,
        all,
        read,
        del,
        json,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) DELETE
        //
        if let Some(id) = del {
            NotifyLogic::delete(&mut pool, id)?;
            success(format!("Notification {} deleted.", id));
            return Ok(());
        }

        //
        // 2) MARK READ (requires --for, enforced by the parser)
        //
        if let (Some(id), Some(email)) = (read, recipient) {
            NotifyLogic::mark_read(&mut pool, id, email)?;
            success(format!("Notification {} marked read for {}.", id, email));
            return Ok(());
        }

        //
        // 3) LIST INBOX
        //
        if let Some(email) = recipient {
            let inbox = NotifyLogic::inbox(&mut pool, email, *all)?;

            if *json {
                let items: Vec<_> = inbox.iter().map(|(n, _)| n).collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
                return Ok(());
            }

            if inbox.is_empty() {
                info("Inbox is empty.");
                return Ok(());
            }

            println!("{CYAN}🔔 Inbox for {}:{RESET}\n", email);

            for (n, read) in &inbox {
                let marker = if *read {
                    format!("{GREY}read{RESET}")
                } else {
                    format!("{GREEN}new{RESET}")
                };
                let reads = notifications::read_count(&pool.conn, &n.id)?;

                println!(
                    "• [{}] {}{}{} ({}, {} read) — id {}",
                    marker,
                    YELLOW,
                    n.title,
                    RESET,
                    n.kind.to_db_str(),
                    reads,
                    n.id
                );
                if !n.body.is_empty() {
                    println!("    {}", n.body);
                }
            }
        } else {
            info("Pass --for EMAIL to list an inbox, --read/--del for actions.");
        }
    }

    Ok(())
}
