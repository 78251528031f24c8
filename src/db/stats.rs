use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) COLLECTION COUNTS
    //
    let sessions: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
    let bookings: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
    let people: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM people", [], |row| row.get(0))?;
    let notifications: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM notifications", [], |row| row.get(0))?;

    println!("{}• Sessions:{} {}{}{}", CYAN, RESET, GREEN, sessions, RESET);
    println!("{}• Bookings:{} {}{}{}", CYAN, RESET, GREEN, bookings, RESET);
    println!("{}• People:{} {}{}{}", CYAN, RESET, GREEN, people, RESET);
    println!(
        "{}• Notifications:{} {}{}{}",
        CYAN, RESET, GREEN, notifications, RESET
    );

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM sessions ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM sessions ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) OCCUPANCY
    //
    let (capacity, taken): (i64, i64) = pool.conn.query_row(
        "SELECT
             IFNULL(SUM(IFNULL(attendee_capacity,0) + IFNULL(volunteer_capacity,0)), 0),
             IFNULL(SUM(IFNULL(attendee_capacity,0) - IFNULL(attendee_seats,0)
                      + IFNULL(volunteer_capacity,0) - IFNULL(volunteer_seats,0)), 0)
         FROM sessions",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    if capacity > 0 {
        let pct = (taken as f64 / capacity as f64) * 100.0;
        println!(
            "{}• Occupancy:{} {}/{} seats ({:.1}%)",
            CYAN, RESET, taken, capacity, pct
        );
    }

    println!();
    Ok(())
}
