//! Integrity sweep over the seat counters.
//!
//! The live booking count is the source of truth: for every offered role,
//! seats remaining must equal capacity minus the live bookings. Drift means
//! a crash landed between a booking write and its ledger adjustment; the
//! sweep reports it (always audit-logged) and repairs it only when asked.

use crate::db::pool::DbPool;
use crate::db::{bookings, log, sessions};
use crate::errors::AppResult;
use crate::models::role::ActivityRole;
use crate::ui::messages::warning;
use rusqlite::params;

/// One seat-counter discrepancy found by the sweep.
#[derive(Debug)]
pub struct SeatDrift {
    pub session_id: String,
    pub title: String,
    pub role: ActivityRole,
    pub recorded: u32,
    pub expected: u32,
}

fn seats_column(role: ActivityRole) -> &'static str {
    match role {
        ActivityRole::Attendee => "attendee_seats",
        ActivityRole::Volunteer => "volunteer_seats",
    }
}

/// Check every session/role pair; optionally repair the counters.
pub fn reconcile_seats(pool: &mut DbPool, fix: bool) -> AppResult<Vec<SeatDrift>> {
    let all = sessions::load_sessions(&pool.conn, &Default::default())?;

    let mut drifts = Vec::new();

    for session in all {
        for role in [ActivityRole::Attendee, ActivityRole::Volunteer] {
            let Some(rs) = session.role_seats(role) else {
                continue;
            };

            let booked = bookings::booked_count(&pool.conn, &session.id, role)?;
            let expected = rs.capacity.saturating_sub(booked);

            if rs.seats == expected {
                continue;
            }

            warning(format!(
                "Seat drift on '{}' ({}): recorded {} remaining, {} live booking(s) imply {}",
                session.title, role.to_db_str(), rs.seats, booked, expected
            ));

            log::ttlog(
                &pool.conn,
                "invariant_violation",
                &session.id,
                &format!(
                    "seat drift: role={} recorded={} expected={}",
                    role.to_db_str(),
                    rs.seats,
                    expected
                ),
            )?;

            if fix {
                pool.conn.execute(
                    &format!(
                        "UPDATE sessions SET {} = ?1 WHERE id = ?2",
                        seats_column(role)
                    ),
                    params![expected, session.id],
                )?;

                log::ttlog(
                    &pool.conn,
                    "reconcile",
                    &session.id,
                    &format!("seats[{}] set to {}", role.to_db_str(), expected),
                )?;
            }

            drifts.push(SeatDrift {
                session_id: session.id.clone(),
                title: session.title.clone(),
                role,
                recorded: rs.seats,
                expected,
            });
        }
    }

    Ok(drifts)
}
