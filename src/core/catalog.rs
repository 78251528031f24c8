//! Session catalog: creation, partial updates, deletion and the exclusive
//! featured flag.

use crate::db::log::ttlog;
use crate::db::pool::{DbPool, with_retry};
use crate::db::{bookings, sessions};
use crate::errors::{AppError, AppResult};
use crate::models::role::ActivityRole;
use crate::models::session::{RoleSeats, Session, SessionDraft, SessionPatch};
use rusqlite::TransactionBehavior;
use uuid::Uuid;

pub struct CatalogLogic;

impl CatalogLogic {
    /// Publish a draft. Seats start equal to capacity for every offered
    /// role; the featured flag always starts cleared.
    pub fn create(pool: &mut DbPool, draft: &SessionDraft) -> AppResult<Session> {
        if draft.attendee_capacity.is_none() && draft.volunteer_capacity.is_none() {
            return Err(AppError::Validation(
                "Session must offer at least one role.".into(),
            ));
        }

        for (cap, role) in [
            (draft.attendee_capacity, "attendee"),
            (draft.volunteer_capacity, "volunteer"),
        ] {
            if cap == Some(0) {
                return Err(AppError::Validation(format!(
                    "Capacity for the {} role must be at least 1.",
                    role
                )));
            }
        }

        if draft.start_time >= draft.end_time {
            return Err(AppError::Validation(
                "Start time must be before end time.".into(),
            ));
        }

        let session = Session {
            id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            location: draft.location.clone(),
            lat: draft.lat,
            lon: draft.lon,
            category: draft.category,
            cadence: draft.cadence,
            attendees: draft.attendee_capacity.map(|capacity| RoleSeats {
                capacity,
                seats: capacity,
            }),
            volunteers: draft.volunteer_capacity.map(|capacity| RoleSeats {
                capacity,
                seats: capacity,
            }),
            accessible: draft.accessible,
            needs_payment: draft.needs_payment,
            fee_cents: draft.fee_cents,
            contact: draft.contact.clone(),
            featured: false,
            created_at: chrono::Local::now().to_rfc3339(),
        };

        with_retry(|| {
            let tx = pool
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;
            sessions::insert_session(&tx, &session)?;
            ttlog(&tx, "sched", &session.id, &session.title)?;
            tx.commit()?;
            Ok(())
        })?;

        Ok(session)
    }

    /// Partial update. Raising a role capacity frees the same number of
    /// seats; shrinking below the booked count is rejected rather than
    /// silently bumping anyone (waitlisting is a product question, not a
    /// catalog default).
    pub fn update(pool: &mut DbPool, id: &str, patch: &SessionPatch) -> AppResult<Session> {
        with_retry(|| {
            let tx = pool
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            let mut session = sessions::load_session(&tx, id)?;

            if let Some(title) = &patch.title {
                session.title = title.clone();
            }
            if let Some(date) = patch.date {
                session.date = date;
            }
            if let Some(start) = patch.start_time {
                session.start_time = start;
            }
            if let Some(end) = patch.end_time {
                session.end_time = end;
            }
            if session.start_time >= session.end_time {
                return Err(AppError::Validation(
                    "Start time must be before end time.".into(),
                ));
            }

            if let Some(location) = &patch.location {
                session.location = location.clone();
            }
            if patch.lat.is_some() {
                session.lat = patch.lat;
            }
            if patch.lon.is_some() {
                session.lon = patch.lon;
            }
            if let Some(category) = patch.category {
                session.category = category;
            }
            if let Some(cadence) = patch.cadence {
                session.cadence = cadence;
            }
            if let Some(accessible) = patch.accessible {
                session.accessible = accessible;
            }
            if let Some(needs_payment) = patch.needs_payment {
                session.needs_payment = needs_payment;
            }
            if patch.fee_cents.is_some() {
                session.fee_cents = patch.fee_cents;
            }
            if let Some(contact) = &patch.contact {
                session.contact = Some(contact.clone());
            }

            if let Some(new_cap) = patch.attendee_capacity {
                session.attendees =
                    Self::resize_role(&tx, &session, ActivityRole::Attendee, new_cap)?;
            }
            if let Some(new_cap) = patch.volunteer_capacity {
                session.volunteers =
                    Self::resize_role(&tx, &session, ActivityRole::Volunteer, new_cap)?;
            }

            if session.attendees.is_none() && session.volunteers.is_none() {
                return Err(AppError::Validation(
                    "Session must offer at least one role.".into(),
                ));
            }

            sessions::update_session(&tx, &session)?;
            ttlog(&tx, "edit", &session.id, &session.title)?;
            tx.commit()?;

            Ok(session)
        })
    }

    /// Apply a capacity change to one role. Capacity 0 withdraws the role
    /// (only when nobody is booked). Seats follow the capacity delta so the
    /// booked count never changes here.
    fn resize_role(
        conn: &rusqlite::Connection,
        session: &Session,
        role: ActivityRole,
        new_cap: u32,
    ) -> AppResult<Option<RoleSeats>> {
        let booked = bookings::booked_count(conn, &session.id, role)?;

        if new_cap < booked {
            return Err(AppError::CapacityBelowDemand {
                role: role.to_db_str().to_string(),
                requested: new_cap,
                booked,
            });
        }

        if new_cap == 0 {
            return Ok(None);
        }

        Ok(Some(RoleSeats {
            capacity: new_cap,
            seats: new_cap - booked,
        }))
    }

    /// Delete a session. Refuses while bookings reference it unless the
    /// caller confirmed the cascade; the cascade removes bookings and the
    /// session in one transaction, with no seat arithmetic (the session is
    /// gone with its counters).
    pub fn delete(pool: &mut DbPool, id: &str, cascade: bool) -> AppResult<()> {
        with_retry(|| {
            let tx = pool
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            // Existence check first so a bad id is not reported as HasBookings.
            let session = sessions::load_session(&tx, id)?;

            let count = bookings::count_for_session(&tx, id)?;
            if count > 0 && !cascade {
                return Err(AppError::HasBookings(count));
            }

            if count > 0 {
                bookings::delete_by_session(&tx, id)?;
            }
            sessions::delete_session(&tx, id)?;

            ttlog(
                &tx,
                "del",
                id,
                &format!("'{}' removed ({} booking(s) cascaded)", session.title, count),
            )?;
            tx.commit()?;

            Ok(())
        })
    }

    /// Move the featured flag to `id`. Clear-old and set-new are one
    /// transaction: readers never observe zero or two featured sessions,
    /// and the partial unique index backs the same rule at schema level.
    pub fn set_featured(pool: &mut DbPool, id: &str) -> AppResult<Session> {
        with_retry(|| {
            let tx = pool
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            // Target must exist before we clear anything.
            sessions::load_session(&tx, id)?;

            tx.execute(
                "UPDATE sessions SET featured = 0 WHERE featured = 1 AND id != ?1",
                [id],
            )?;
            tx.execute("UPDATE sessions SET featured = 1 WHERE id = ?1", [id])?;

            let session = sessions::load_session(&tx, id)?;
            ttlog(&tx, "feature", id, &session.title)?;
            tx.commit()?;

            Ok(session)
        })
    }

    /// Clear the featured flag only if `id` currently holds it.
    pub fn clear_featured(pool: &mut DbPool, id: &str) -> AppResult<()> {
        with_retry(|| {
            let changed = pool.conn.execute(
                "UPDATE sessions SET featured = 0 WHERE id = ?1 AND featured = 1",
                [id],
            )?;

            if changed == 1 {
                ttlog(&pool.conn, "feature", id, "featured flag cleared")?;
            }

            Ok(())
        })
    }
}
