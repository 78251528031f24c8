use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::booking::BookingLogic;
use crate::db::people;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::booking::{BookingDetails, Membership};
use crate::models::role::ActivityRole;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Register {
        session,
        email,
        role,
        membership,
        pay,
        note,
    } = cmd
    {
        let role = match role {
            Some(r) => {
                ActivityRole::ar_from_str(r).ok_or_else(|| AppError::InvalidRole(r.clone()))?
            }
            None => ActivityRole::Attendee,
        };

        let membership_code = membership
            .clone()
            .unwrap_or_else(|| cfg.default_membership.clone());
        let membership = Membership::from_code(&membership_code).ok_or_else(|| {
            AppError::Validation(format!("Invalid membership: {}", membership_code))
        })?;

        let mut pool = DbPool::new(&cfg.database)?;

        // Mobility comes from the identity projection, never from flags.
        let person = people::load_person(&pool.conn, email)?;

        let details = BookingDetails {
            membership,
            needs_payment: *pay,
            note: note.clone(),
        };

        let booking = BookingLogic::register(&mut pool, &person, session, role, &details)?;

        success(format!(
            "Registered {} as {} for session {}. Booking id: {}",
            person.email,
            role.to_db_str(),
            session,
            booking.id
        ));
    }

    Ok(())
}
