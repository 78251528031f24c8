use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::sessions::{self, SessionFilter};
use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::models::role::ActivityRole;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREY, RESET, color_for_seats};
use crate::utils::date;
use crate::utils::formatting::{describe_category, seats_cell};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        category,
        role,
        featured,
        json,
    } = cmd
    {
        let mut filter = SessionFilter {
            featured_only: *featured,
            ..Default::default()
        };

        if let Some(p) = period {
            let (from, to) = date::period_bounds(p).map_err(AppError::InvalidDate)?;
            filter.from = Some(from);
            filter.to = Some(to);
        }

        if let Some(c) = category {
            filter.category =
                Some(Category::from_code(c).ok_or_else(|| AppError::InvalidCategory(c.clone()))?);
        }

        if let Some(r) = role {
            filter.offers_role =
                Some(ActivityRole::ar_from_str(r).ok_or_else(|| AppError::InvalidRole(r.clone()))?);
        }

        let mut pool = DbPool::new(&cfg.database)?;
        let found = sessions::load_sessions(&pool.conn, &filter)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&found)?);
            return Ok(());
        }

        if found.is_empty() {
            info("No sessions match the given filters.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column { header: "DATE".into(), width: 10 },
            Column { header: "TIME".into(), width: 13 },
            Column { header: "TITLE".into(), width: 28 },
            Column { header: "CATEGORY".into(), width: 10 },
            Column { header: "ATT".into(), width: 7 },
            Column { header: "VOL".into(), width: 7 },
            Column { header: "FLAGS".into(), width: 7 },
            Column { header: "ID".into(), width: 36 },
        ]);

        for s in &found {
            let att = match &s.attendees {
                Some(r) => format!(
                    "{}{}{}",
                    color_for_seats(r.seats),
                    seats_cell(r.seats, r.capacity),
                    RESET
                ),
                None => format!("{GREY}--{RESET}"),
            };
            let vol = match &s.volunteers {
                Some(r) => format!(
                    "{}{}{}",
                    color_for_seats(r.seats),
                    seats_cell(r.seats, r.capacity),
                    RESET
                ),
                None => format!("{GREY}--{RESET}"),
            };

            let mut flags = String::new();
            if s.featured {
                flags.push('★');
            }
            if s.accessible {
                flags.push('♿');
            }
            if s.needs_payment {
                flags.push('€');
            }

            let title_cell = if cfg.show_coordinates.eq_ignore_ascii_case("full")
                && let (Some(lat), Some(lon)) = (s.lat, s.lon)
            {
                format!("{} ({:.4},{:.4})", s.title, lat, lon)
            } else {
                s.title.clone()
            };

            let (cat_label, cat_color) = describe_category(s.category.to_db_str());

            table.add_row(vec![
                s.date_str(),
                format!("{} {} {}", s.start_str(), cfg.separator_char, s.end_str()),
                title_cell,
                format!("{cat_color}{cat_label}{RESET}"),
                att,
                vol,
                flags,
                s.id.clone(),
            ]);
        }

        println!("{CYAN}📅 Sessions:{RESET}\n");
        print!("{}", table.render());
    }

    Ok(())
}
