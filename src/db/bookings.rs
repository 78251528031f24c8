use crate::errors::{AppError, AppResult};
use crate::models::booking::{Booking, Membership};
use crate::models::role::ActivityRole;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub fn map_row(row: &Row) -> Result<Booking> {
    let role_str: String = row.get("role")?;
    let role = ActivityRole::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    let membership_str: String = row.get("membership")?;
    let membership = Membership::from_db_str(&membership_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!(
                "Invalid membership: {}",
                membership_str
            ))),
        )
    })?;

    Ok(Booking {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        role,
        membership,
        needs_accessible: row.get::<_, i32>("needs_accessible")? == 1,
        needs_payment: row.get::<_, i32>("needs_payment")? == 1,
        note: row.get("note")?,
        attended: row.get::<_, i32>("attended")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_booking(conn: &Connection, b: &Booking) -> AppResult<()> {
    conn.execute(
        "INSERT INTO bookings (id, session_id, name, email, role, membership,
                               needs_accessible, needs_payment, note, attended, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            b.id,
            b.session_id,
            b.name,
            b.email,
            b.role.to_db_str(),
            b.membership.to_db_str(),
            if b.needs_accessible { 1 } else { 0 },
            if b.needs_payment { 1 } else { 0 },
            b.note,
            if b.attended { 1 } else { 0 },
            b.created_at,
        ],
    )?;
    Ok(())
}

/// The live booking for (session, email, role), if any.
pub fn find_live(
    conn: &Connection,
    session_id: &str,
    email: &str,
    role: ActivityRole,
) -> AppResult<Option<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM bookings WHERE session_id = ?1 AND email = ?2 AND role = ?3",
    )?;

    Ok(stmt
        .query_row(params![session_id, email, role.to_db_str()], map_row)
        .optional()?)
}

pub fn load_booking(conn: &Connection, id: &str) -> AppResult<Booking> {
    let mut stmt = conn.prepare("SELECT * FROM bookings WHERE id = ?1")?;

    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::BookingNotFound(id.to_string()))
}

pub fn load_by_session(conn: &Connection, session_id: &str) -> AppResult<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM bookings WHERE session_id = ?1 ORDER BY created_at ASC",
    )?;

    let rows = stmt.query_map([session_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_by_email(conn: &Connection, email: &str) -> AppResult<Vec<Booking>> {
    let mut stmt =
        conn.prepare("SELECT * FROM bookings WHERE email = ?1 ORDER BY created_at ASC")?;

    let rows = stmt.query_map([email], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Time intervals of every other live booking the person holds on a date.
/// Returns (session title, start, end) triples for the clash test.
pub fn same_day_intervals(
    conn: &Connection,
    email: &str,
    date: &NaiveDate,
    exclude_session: &str,
) -> AppResult<Vec<(String, NaiveTime, NaiveTime)>> {
    let mut stmt = conn.prepare(
        "SELECT s.title, s.start_time, s.end_time
         FROM bookings b
         JOIN sessions s ON s.id = b.session_id
         WHERE b.email = ?1 AND s.date = ?2 AND s.id != ?3",
    )?;

    let date_str = date.format("%Y-%m-%d").to_string();

    let rows = stmt.query_map(params![email, date_str, exclude_session], |row| {
        let title: String = row.get(0)?;
        let start_str: String = row.get(1)?;
        let end_str: String = row.get(2)?;
        Ok((title, start_str, end_str))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (title, start_str, end_str) = r?;

        let start = NaiveTime::parse_from_str(&start_str, "%H:%M")
            .map_err(|_| AppError::InvalidTime(start_str.clone()))?;
        let end = NaiveTime::parse_from_str(&end_str, "%H:%M")
            .map_err(|_| AppError::InvalidTime(end_str.clone()))?;

        out.push((title, start, end));
    }
    Ok(out)
}

/// Remove the live booking for (session, email, role); returns rows deleted.
pub fn delete_booking(
    conn: &Connection,
    session_id: &str,
    email: &str,
    role: ActivityRole,
) -> AppResult<usize> {
    let changed = conn.execute(
        "DELETE FROM bookings WHERE session_id = ?1 AND email = ?2 AND role = ?3",
        params![session_id, email, role.to_db_str()],
    )?;
    Ok(changed)
}

pub fn delete_by_session(conn: &Connection, session_id: &str) -> AppResult<usize> {
    let changed = conn.execute("DELETE FROM bookings WHERE session_id = ?1", [session_id])?;
    Ok(changed)
}

pub fn count_for_session(conn: &Connection, session_id: &str) -> AppResult<u32> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE session_id = ?1",
        [session_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Live booking count for one (session, role) pair — the source of truth
/// the integrity sweep reconciles seat counters against.
pub fn booked_count(
    conn: &Connection,
    session_id: &str,
    role: ActivityRole,
) -> AppResult<u32> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE session_id = ?1 AND role = ?2",
        params![session_id, role.to_db_str()],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn set_attended(conn: &Connection, booking_id: &str, attended: bool) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE bookings SET attended = ?1 WHERE id = ?2",
        params![if attended { 1 } else { 0 }, booking_id],
    )?;
    Ok(changed)
}
