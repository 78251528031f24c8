use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::models::session::{Cadence, RoleSeats, Session};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub fn map_row(row: &Row) -> Result<Session> {
    let date_str: String = row.get("date")?;
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let start_time = NaiveTime::parse_from_str(&start_str, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(start_str.clone())),
        )
    })?;

    let end_time = NaiveTime::parse_from_str(&end_str, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(end_str.clone())),
        )
    })?;

    let cat_str: String = row.get("category")?;
    let category = Category::from_db_str(&cat_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidCategory(cat_str.clone())),
        )
    })?;

    let cadence_str: String = row.get("cadence")?;
    let cadence = Cadence::from_db_str(&cadence_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!(
                "Invalid cadence: {}",
                cadence_str
            ))),
        )
    })?;

    let attendees = match (
        row.get::<_, Option<u32>>("attendee_capacity")?,
        row.get::<_, Option<u32>>("attendee_seats")?,
    ) {
        (Some(capacity), Some(seats)) => Some(RoleSeats { capacity, seats }),
        _ => None,
    };

    let volunteers = match (
        row.get::<_, Option<u32>>("volunteer_capacity")?,
        row.get::<_, Option<u32>>("volunteer_seats")?,
    ) {
        (Some(capacity), Some(seats)) => Some(RoleSeats { capacity, seats }),
        _ => None,
    };

    Ok(Session {
        id: row.get("id")?,
        title: row.get("title")?,
        date,
        start_time,
        end_time,
        location: row.get("location")?,
        lat: row.get("lat")?,
        lon: row.get("lon")?,
        category,
        cadence,
        attendees,
        volunteers,
        accessible: row.get::<_, i32>("accessible")? == 1,
        needs_payment: row.get::<_, i32>("needs_payment")? == 1,
        fee_cents: row.get("fee_cents")?,
        contact: row.get("contact_email")?,
        featured: row.get::<_, i32>("featured")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_session(conn: &Connection, s: &Session) -> AppResult<()> {
    conn.execute(
        "INSERT INTO sessions (id, title, date, start_time, end_time, location, lat, lon,
                               category, cadence, attendee_capacity, attendee_seats,
                               volunteer_capacity, volunteer_seats, accessible,
                               needs_payment, fee_cents, contact_email, featured, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        params![
            s.id,
            s.title,
            s.date_str(),
            s.start_str(),
            s.end_str(),
            s.location,
            s.lat,
            s.lon,
            s.category.to_db_str(),
            s.cadence.to_db_str(),
            s.attendees.map(|r| r.capacity),
            s.attendees.map(|r| r.seats),
            s.volunteers.map(|r| r.capacity),
            s.volunteers.map(|r| r.seats),
            if s.accessible { 1 } else { 0 },
            if s.needs_payment { 1 } else { 0 },
            s.fee_cents,
            s.contact,
            if s.featured { 1 } else { 0 },
            s.created_at,
        ],
    )?;
    Ok(())
}

/// Update a session row (all fields except id and created_at).
pub fn update_session(conn: &Connection, s: &Session) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions
         SET title = ?1, date = ?2, start_time = ?3, end_time = ?4,
             location = ?5, lat = ?6, lon = ?7, category = ?8, cadence = ?9,
             attendee_capacity = ?10, attendee_seats = ?11,
             volunteer_capacity = ?12, volunteer_seats = ?13,
             accessible = ?14, needs_payment = ?15, fee_cents = ?16,
             contact_email = ?17, featured = ?18
         WHERE id = ?19",
        params![
            s.title,
            s.date_str(),
            s.start_str(),
            s.end_str(),
            s.location,
            s.lat,
            s.lon,
            s.category.to_db_str(),
            s.cadence.to_db_str(),
            s.attendees.map(|r| r.capacity),
            s.attendees.map(|r| r.seats),
            s.volunteers.map(|r| r.capacity),
            s.volunteers.map(|r| r.seats),
            if s.accessible { 1 } else { 0 },
            if s.needs_payment { 1 } else { 0 },
            s.fee_cents,
            s.contact,
            if s.featured { 1 } else { 0 },
            s.id,
        ],
    )?;
    Ok(())
}

pub fn load_session(conn: &Connection, id: &str) -> AppResult<Session> {
    let mut stmt = conn.prepare("SELECT * FROM sessions WHERE id = ?1")?;

    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
}

/// Filters for `load_sessions`. All optional; unset = no constraint.
#[derive(Debug, Default)]
pub struct SessionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<Category>,
    pub offers_role: Option<crate::models::role::ActivityRole>,
    pub featured_only: bool,
}

pub fn load_sessions(conn: &Connection, filter: &SessionFilter) -> AppResult<Vec<Session>> {
    let mut sql = String::from("SELECT * FROM sessions WHERE 1=1");
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(from) = filter.from {
        args.push(Box::new(from.format("%Y-%m-%d").to_string()));
        sql.push_str(&format!(" AND date >= ?{}", args.len()));
    }
    if let Some(to) = filter.to {
        args.push(Box::new(to.format("%Y-%m-%d").to_string()));
        sql.push_str(&format!(" AND date <= ?{}", args.len()));
    }
    if let Some(cat) = filter.category {
        args.push(Box::new(cat.to_db_str().to_string()));
        sql.push_str(&format!(" AND category = ?{}", args.len()));
    }
    if let Some(role) = filter.offers_role {
        match role {
            crate::models::role::ActivityRole::Attendee => {
                sql.push_str(" AND attendee_capacity IS NOT NULL")
            }
            crate::models::role::ActivityRole::Volunteer => {
                sql.push_str(" AND volunteer_capacity IS NOT NULL")
            }
        }
    }
    if filter.featured_only {
        sql.push_str(" AND featured = 1");
    }

    sql.push_str(" ORDER BY date ASC, start_time ASC");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = args.iter().map(|b| b.as_ref()).collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(params), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The session currently holding the featured flag, if any.
pub fn featured_session(conn: &Connection) -> AppResult<Option<Session>> {
    let mut stmt = conn.prepare("SELECT * FROM sessions WHERE featured = 1 LIMIT 1")?;
    Ok(stmt.query_row([], map_row).optional()?)
}

pub fn delete_session(conn: &Connection, id: &str) -> AppResult<usize> {
    conn.execute("DELETE FROM session_staff WHERE session_id = ?1", [id])?;
    let changed = conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
    Ok(changed)
}

pub fn add_staff(conn: &Connection, session_id: &str, email: &str, name: &str) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO session_staff (session_id, email, name) VALUES (?1, ?2, ?3)",
        params![session_id, email, name],
    )?;
    Ok(())
}

pub fn remove_staff(conn: &Connection, session_id: &str, email: &str) -> AppResult<usize> {
    let changed = conn.execute(
        "DELETE FROM session_staff WHERE session_id = ?1 AND email = ?2",
        params![session_id, email],
    )?;
    Ok(changed)
}

pub fn load_staff(conn: &Connection, session_id: &str) -> AppResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare(
        "SELECT email, name FROM session_staff WHERE session_id = ?1 ORDER BY email ASC",
    )?;

    let rows = stmt.query_map([session_id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
