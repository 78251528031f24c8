//! Capacity ledger: the only code that mutates seat counters.
//!
//! Both operations are a single guarded UPDATE, so the read-modify-write is
//! atomic per (session, role) — two concurrent reserves for the last seat
//! cannot both pass the `seats >= 1` guard. Callers that need the seat
//! change and a booking write to land together wrap both in one IMMEDIATE
//! transaction (see core::booking).

use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::role::ActivityRole;
use rusqlite::{Connection, OptionalExtension};

fn seats_column(role: ActivityRole) -> &'static str {
    match role {
        ActivityRole::Attendee => "attendee_seats",
        ActivityRole::Volunteer => "volunteer_seats",
    }
}

fn capacity_column(role: ActivityRole) -> &'static str {
    match role {
        ActivityRole::Attendee => "attendee_capacity",
        ActivityRole::Volunteer => "volunteer_capacity",
    }
}

/// Take one seat. Fails with CapacityExhausted when none remain.
pub fn reserve(conn: &Connection, session_id: &str, role: ActivityRole) -> AppResult<()> {
    let col = seats_column(role);

    let changed = conn.execute(
        &format!(
            "UPDATE sessions SET {col} = {col} - 1 WHERE id = ?1 AND {col} >= 1"
        ),
        [session_id],
    )?;

    if changed == 1 {
        return Ok(());
    }

    classify_failure(conn, session_id, role, true)
}

/// Give one seat back, capped at capacity. An increment past capacity means
/// the bookkeeping upstream is broken: audit-logged and failed closed,
/// never clamped.
pub fn release(conn: &Connection, session_id: &str, role: ActivityRole) -> AppResult<()> {
    let seats = seats_column(role);
    let cap = capacity_column(role);

    let changed = conn.execute(
        &format!(
            "UPDATE sessions SET {seats} = {seats} + 1 WHERE id = ?1 AND {seats} < {cap}"
        ),
        [session_id],
    )?;

    if changed == 1 {
        return Ok(());
    }

    match classify_failure(conn, session_id, role, false) {
        Err(e @ AppError::InvariantViolation(_)) => {
            ttlog(
                conn,
                "invariant_violation",
                session_id,
                &format!("release past capacity for role {}", role.to_db_str()),
            )?;
            Err(e)
        }
        other => other,
    }
}

/// Classify a zero-row guarded update: missing session, role not offered,
/// or the guard itself (exhausted on reserve, at capacity on release).
fn classify_failure(
    conn: &Connection,
    session_id: &str,
    role: ActivityRole,
    reserving: bool,
) -> AppResult<()> {
    let col = seats_column(role);

    let seats: Option<Option<i64>> = conn
        .query_row(
            &format!("SELECT {col} FROM sessions WHERE id = ?1"),
            [session_id],
            |row| row.get(0),
        )
        .optional()?;

    match seats {
        None => Err(AppError::SessionNotFound(session_id.to_string())),
        Some(None) => Err(AppError::Validation(format!(
            "Session does not offer the {} role",
            role.to_db_str()
        ))),
        Some(Some(_)) if reserving => {
            Err(AppError::CapacityExhausted(role.to_db_str().to_string()))
        }
        Some(Some(n)) => Err(AppError::InvariantViolation(format!(
            "release would push {} past capacity (currently {})",
            col, n
        ))),
    }
}
