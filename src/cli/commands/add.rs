use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::models::session::{Cadence, SessionDraft};
use crate::ui::messages::{info, success};
use crate::utils::formatting::cents2readable;
use crate::utils::{date, time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
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
        fee,
        contact,
    } = cmd
    {
        let d = date::parse_date(date_str)
            .ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;
        let start_time =
            time::parse_time(start).ok_or_else(|| AppError::InvalidTime(start.clone()))?;
        let end_time = time::parse_time(end).ok_or_else(|| AppError::InvalidTime(end.clone()))?;

        // Fall back to the configured defaults when flags are omitted.
        let cat_code = category.clone().unwrap_or_else(|| cfg.default_category.clone());
        let cat = Category::from_code(&cat_code)
            .ok_or_else(|| AppError::InvalidCategory(cat_code.clone()))?;

        let cadence_code = cadence.clone().unwrap_or_else(|| cfg.default_cadence.clone());
        let cad = Cadence::from_code(&cadence_code).ok_or_else(|| {
            AppError::Validation(format!("Invalid cadence: {}", cadence_code))
        })?;

        let draft = SessionDraft {
            title: title.clone(),
            date: d,
            start_time,
            end_time,
            location: place.clone(),
            lat: *lat,
            lon: *lon,
            category: cat,
            cadence: cad,
            attendee_capacity: *attendees,
            volunteer_capacity: *volunteers,
            accessible: *accessible,
            needs_payment: fee.is_some(),
            fee_cents: *fee,
            contact: contact.clone(),
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let session = CatalogLogic::create(&mut pool, &draft)?;

        success(format!(
            "Scheduled '{}' on {} ({} - {}). Id: {}",
            session.title,
            session.date_str(),
            session.start_str(),
            session.end_str(),
            session.id
        ));

        if let Some(cents) = session.fee_cents {
            info(format!("Participation fee: {}", cents2readable(cents)));
        }
    }

    Ok(())
}
