//! Booking resolver: the register/unregister state machine.
//!
//! Per (person, session, role) the states are Unbooked → Booked → Unbooked,
//! nothing in between. The eligibility checks are read-only; only the
//! reserve + insert pair mutates state, and those two run in one IMMEDIATE
//! transaction, so a rejected attempt leaves no trace.

use crate::core::ledger;
use crate::db::log::ttlog;
use crate::db::pool::{DbPool, with_retry};
use crate::db::{bookings, sessions};
use crate::errors::{AppError, AppResult};
use crate::models::booking::{Booking, BookingDetails};
use crate::models::person::Person;
use crate::models::role::ActivityRole;
use crate::utils::time::intervals_overlap;
use rusqlite::TransactionBehavior;
use uuid::Uuid;

pub struct BookingLogic;

impl BookingLogic {
    pub fn register(
        pool: &mut DbPool,
        person: &Person,
        session_id: &str,
        role: ActivityRole,
        details: &BookingDetails,
    ) -> AppResult<Booking> {
        with_retry(|| Self::try_register(pool, person, session_id, role, details))
    }

    fn try_register(
        pool: &mut DbPool,
        person: &Person,
        session_id: &str,
        role: ActivityRole,
        details: &BookingDetails,
    ) -> AppResult<Booking> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let session = sessions::load_session(&tx, session_id)?;

        //
        // 1) Duplicate booking
        //
        if bookings::find_live(&tx, session_id, &person.email, role)?.is_some() {
            return Err(AppError::AlreadyBooked {
                email: person.email.clone(),
                role: role.to_db_str().to_string(),
            });
        }

        //
        // 2) Timing clash: any other live booking of this person whose
        //    session overlaps [start, end) on the same calendar day.
        //
        for (title, start, end) in
            bookings::same_day_intervals(&tx, &person.email, &session.date, session_id)?
        {
            if intervals_overlap(start, end, session.start_time, session.end_time) {
                return Err(AppError::TimingClash {
                    title,
                    start: start.format("%H:%M").to_string(),
                    end: end.format("%H:%M").to_string(),
                });
            }
        }

        //
        // 3) Accessibility fit. Volunteers skip this check entirely.
        //
        let needs_accessible = person.mobility.requires_accessible();
        if role.is_attendee() && needs_accessible && !session.accessible {
            return Err(AppError::AccessibilityMismatch(
                person.mobility.to_db_str().to_string(),
            ));
        }

        //
        // 4) Reserve the seat (the only mutation before the insert).
        //
        match ledger::reserve(&tx, session_id, role) {
            Err(AppError::CapacityExhausted(r)) => return Err(AppError::SessionFull(r)),
            other => other?,
        }

        //
        // 5) Persist the booking.
        //
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            name: person.name.clone(),
            email: person.email.clone(),
            role,
            membership: details.membership,
            needs_accessible,
            needs_payment: details.needs_payment || session.needs_payment,
            note: details.note.clone(),
            attended: false,
            created_at: chrono::Local::now().to_rfc3339(),
        };

        bookings::insert_booking(&tx, &booking)?;
        ttlog(
            &tx,
            "register",
            session_id,
            &format!("{} as {}", person.email, role.to_db_str()),
        )?;
        tx.commit()?;

        Ok(booking)
    }

    /// Remove the live booking and give its seat back, atomically. A second
    /// call for the same triple fails NotBooked and restores nothing.
    pub fn unregister(
        pool: &mut DbPool,
        email: &str,
        session_id: &str,
        role: ActivityRole,
    ) -> AppResult<()> {
        with_retry(|| {
            let tx = pool
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            let deleted = bookings::delete_booking(&tx, session_id, email, role)?;
            if deleted == 0 {
                return Err(AppError::NotBooked {
                    email: email.to_string(),
                    role: role.to_db_str().to_string(),
                });
            }

            // A blocked release is an InvariantViolation and aborts the
            // whole transaction — the booking delete rolls back with it.
            ledger::release(&tx, session_id, role)?;

            ttlog(
                &tx,
                "unregister",
                session_id,
                &format!("{} as {}", email, role.to_db_str()),
            )?;
            tx.commit()?;

            Ok(())
        })
    }

    /// Staff-only flip of the attended flag, recorded after the fact.
    pub fn mark_attended(pool: &mut DbPool, booking_id: &str, attended: bool) -> AppResult<()> {
        with_retry(|| {
            let changed = bookings::set_attended(&pool.conn, booking_id, attended)?;
            if changed == 0 {
                return Err(AppError::BookingNotFound(booking_id.to_string()));
            }

            ttlog(
                &pool.conn,
                "attend",
                booking_id,
                if attended { "attended" } else { "attendance revoked" },
            )?;

            Ok(())
        })
    }
}
