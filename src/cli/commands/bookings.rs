use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{bookings, sessions};
use crate::errors::{AppError, AppResult};
use crate::models::booking::Booking;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET};
use crate::utils::table::{Column, Table};

fn render(rows: &[Booking], conn: &rusqlite::Connection) -> AppResult<()> {
    let mut table = Table::new(vec![
        Column { header: "SESSION".into(), width: 28 },
        Column { header: "NAME".into(), width: 20 },
        Column { header: "EMAIL".into(), width: 26 },
        Column { header: "ROLE".into(), width: 9 },
        Column { header: "ATT".into(), width: 3 },
        Column { header: "ID".into(), width: 36 },
    ]);

    for b in rows {
        let title = sessions::load_session(conn, &b.session_id)
            .map(|s| s.title)
            .unwrap_or_else(|_| b.session_id.clone());

        table.add_row(vec![
            title,
            b.name.clone(),
            b.email.clone(),
            b.role.to_db_str().to_string(),
            if b.attended {
                format!("{GREEN}✓{RESET}")
            } else {
                format!("{GREY}-{RESET}")
            },
            b.id.clone(),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Bookings {
        session,
        email,
        json,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let rows = match (session, email) {
            (Some(sid), Some(mail)) => {
                // Both filters: narrow by session, then by person.
                bookings::load_by_session(&pool.conn, sid)?
                    .into_iter()
                    .filter(|b| &b.email == mail)
                    .collect()
            }
            (Some(sid), None) => bookings::load_by_session(&pool.conn, sid)?,
            (None, Some(mail)) => bookings::load_by_email(&pool.conn, mail)?,
            (None, None) => {
                return Err(AppError::Validation(
                    "Pass --session and/or --email to select bookings.".into(),
                ));
            }
        };

        if *json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if rows.is_empty() {
            info("No bookings found.");
            return Ok(());
        }

        println!("{CYAN}🎟️  Bookings:{RESET}\n");
        render(&rows, &pool.conn)?;
    }

    Ok(())
}
