//! Audience resolver: turns a selector into the set of recipient emails.

use crate::errors::AppResult;
use crate::models::audience::Audience;
use rusqlite::Connection;
use std::collections::BTreeSet;

/// Attended volunteer bookings needed before a volunteer counts as
/// "experienced". Tunable here without touching any call site.
pub const EXPERIENCED_VOLUNTEER_MIN_ATTENDED: u32 = 5;

pub struct AudienceLogic;

impl AudienceLogic {
    pub fn resolve(conn: &Connection, selector: Audience) -> AppResult<BTreeSet<String>> {
        match selector {
            Audience::All => Self::emails(conn, "SELECT email FROM people", None),
            Audience::Participants => Self::emails(
                conn,
                "SELECT email FROM people WHERE role = 'participant'",
                None,
            ),
            Audience::Volunteers => Self::emails(
                conn,
                "SELECT email FROM people WHERE role = 'volunteer'",
                None,
            ),
            Audience::ExperiencedVolunteers => Self::emails(
                conn,
                // Counted over every booking still on record for the person
                // with role volunteer, across all sessions.
                "SELECT p.email FROM people p
                 JOIN bookings b ON b.email = p.email
                 WHERE p.role = 'volunteer'
                   AND b.role = 'volunteer'
                   AND b.attended = 1
                 GROUP BY p.email
                 HAVING COUNT(*) >= ?1",
                Some(EXPERIENCED_VOLUNTEER_MIN_ATTENDED),
            ),
        }
    }

    fn emails(
        conn: &Connection,
        sql: &str,
        threshold: Option<u32>,
    ) -> AppResult<BTreeSet<String>> {
        let mut stmt = conn.prepare(sql)?;

        let mut out = BTreeSet::new();

        if let Some(t) = threshold {
            let rows = stmt.query_map([t], |row| row.get::<_, String>(0))?;
            for r in rows {
                out.insert(r?);
            }
        } else {
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            for r in rows {
                out.insert(r?);
            }
        }

        Ok(out)
    }
}
