use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::people;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::person::{MobilityStatus, Person, PersonRole};
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::table::{Column, Table};
use rusqlite::OptionalExtension;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Person {
        add,
        name,
        role,
        mobility,
        lat,
        lon,
        tags,
        onboarded,
        list,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // ADD / UPDATE
        //
        if let Some(email) = add {
            // Start from the existing row when present so a partial update
            // does not reset the other fields.
            let existing: Option<Person> = {
                let mut stmt = pool.conn.prepare("SELECT * FROM people WHERE email = ?1")?;
                stmt.query_row([email.as_str()], people::map_row).optional()?
            };

            let mut person = match existing {
                Some(p) => p,
                None => {
                    let n = name.clone().ok_or_else(|| {
                        AppError::Validation("--name is required for a new person.".into())
                    })?;
                    let r = role.clone().ok_or_else(|| {
                        AppError::Validation("--role is required for a new person.".into())
                    })?;
                    let role = PersonRole::from_code(&r)
                        .ok_or_else(|| AppError::InvalidRole(r.clone()))?;
                    Person::new(email, &n, role)
                }
            };

            if let Some(n) = name {
                person.name = n.clone();
            }
            if let Some(r) = role {
                person.role =
                    PersonRole::from_code(r).ok_or_else(|| AppError::InvalidRole(r.clone()))?;
            }
            if let Some(m) = mobility {
                person.mobility = MobilityStatus::from_code(m)
                    .ok_or_else(|| AppError::InvalidMobility(m.clone()))?;
            }
            if lat.is_some() {
                person.home_lat = *lat;
            }
            if lon.is_some() {
                person.home_lon = *lon;
            }
            if let Some(t) = tags {
                person.tags = t.clone();
            }
            if *onboarded {
                person.onboarded = true;
            }

            people::upsert_person(&pool.conn, &person)?;
            success(format!(
                "Stored {} ({}, {}).",
                person.email,
                person.role.to_db_str(),
                person.mobility.to_db_str()
            ));
        }

        //
        // LIST
        //
        if *list {
            let all = people::load_people(&pool.conn)?;

            if all.is_empty() {
                info("No people on record.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column { header: "EMAIL".into(), width: 28 },
                Column { header: "NAME".into(), width: 20 },
                Column { header: "ROLE".into(), width: 12 },
                Column { header: "MOBILITY".into(), width: 14 },
                Column { header: "ONB".into(), width: 3 },
            ]);

            for p in &all {
                table.add_row(vec![
                    p.email.clone(),
                    p.name.clone(),
                    p.role.to_db_str().to_string(),
                    p.mobility.to_db_str().to_string(),
                    if p.onboarded {
                        "✓".to_string()
                    } else {
                        format!("{GREY}-{RESET}")
                    },
                ]);
            }

            println!("{CYAN}👥 People:{RESET}\n");
            print!("{}", table.render());
        }
    }

    Ok(())
}
