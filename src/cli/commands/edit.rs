use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::db::pool::DbPool;
use crate::db::sessions;
use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::models::session::{Cadence, SessionPatch};
use crate::ui::messages::{info, success};
use crate::utils::{date, time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        title,
        date: date_str,
        start,
        end,
        place,
        lat,
        lon,
        category,
        cadence,
        attendees,
        volunteers,
        accessible,
        not_accessible,
        fee,
        contact,
        staff,
        unstaff,
    } = cmd
    {
        let mut patch = SessionPatch {
            title: title.clone(),
            location: place.clone(),
            lat: *lat,
            lon: *lon,
            attendee_capacity: *attendees,
            volunteer_capacity: *volunteers,
            fee_cents: *fee,
            contact: contact.clone(),
            ..Default::default()
        };

        if let Some(s) = date_str {
            patch.date = Some(date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?);
        }
        patch.start_time = time::parse_optional_time(start.as_ref())?;
        patch.end_time = time::parse_optional_time(end.as_ref())?;

        if let Some(c) = category {
            patch.category =
                Some(Category::from_code(c).ok_or_else(|| AppError::InvalidCategory(c.clone()))?);
        }
        if let Some(c) = cadence {
            patch.cadence = Some(
                Cadence::from_code(c)
                    .ok_or_else(|| AppError::Validation(format!("Invalid cadence: {}", c)))?,
            );
        }

        if *accessible {
            patch.accessible = Some(true);
        } else if *not_accessible {
            patch.accessible = Some(false);
        }

        if fee.is_some() {
            patch.needs_payment = Some(true);
        }

        let mut pool = DbPool::new(&cfg.database)?;

        //
        // Present-staff bookkeeping first (independent of the patch)
        //
        if let Some(email) = staff {
            sessions::load_session(&pool.conn, id)?;
            sessions::add_staff(&pool.conn, id, email, "")?;
            info(format!("Recorded {} as present staff.", email));
        }
        if let Some(email) = unstaff {
            let removed = sessions::remove_staff(&pool.conn, id, email)?;
            if removed > 0 {
                info(format!("Removed {} from present staff.", email));
            }
        }

        let session = CatalogLogic::update(&mut pool, id, &patch)?;

        success(format!(
            "Updated '{}' on {} ({} - {}).",
            session.title,
            session.date_str(),
            session.start_str(),
            session.end_str()
        ));
    }

    Ok(())
}
