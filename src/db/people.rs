use crate::errors::{AppError, AppResult};
use crate::models::person::{MobilityStatus, Person, PersonRole};
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub fn map_row(row: &Row) -> Result<Person> {
    let role_str: String = row.get("role")?;
    let role = PersonRole::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    let mobility_str: String = row.get("mobility")?;
    let mobility = MobilityStatus::from_db_str(&mobility_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidMobility(mobility_str.clone())),
        )
    })?;

    Ok(Person {
        email: row.get("email")?,
        name: row.get("name")?,
        role,
        mobility,
        home_lat: row.get("home_lat")?,
        home_lon: row.get("home_lon")?,
        tags: row.get("tags")?,
        onboarded: row.get::<_, i32>("onboarded")? == 1,
        created_at: row.get("created_at")?,
    })
}

/// Insert or replace the identity projection row for a person.
pub fn upsert_person(conn: &Connection, p: &Person) -> AppResult<()> {
    conn.execute(
        "INSERT INTO people (email, name, role, mobility, home_lat, home_lon, tags, onboarded, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(email) DO UPDATE SET
             name = excluded.name,
             role = excluded.role,
             mobility = excluded.mobility,
             home_lat = excluded.home_lat,
             home_lon = excluded.home_lon,
             tags = excluded.tags,
             onboarded = excluded.onboarded",
        params![
            p.email,
            p.name,
            p.role.to_db_str(),
            p.mobility.to_db_str(),
            p.home_lat,
            p.home_lon,
            p.tags,
            if p.onboarded { 1 } else { 0 },
            p.created_at,
        ],
    )?;
    Ok(())
}

pub fn load_person(conn: &Connection, email: &str) -> AppResult<Person> {
    let mut stmt = conn.prepare("SELECT * FROM people WHERE email = ?1")?;

    stmt.query_row([email], map_row)
        .optional()?
        .ok_or_else(|| AppError::PersonNotFound(email.to_string()))
}

pub fn load_people(conn: &Connection) -> AppResult<Vec<Person>> {
    let mut stmt = conn.prepare("SELECT * FROM people ORDER BY email ASC")?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
