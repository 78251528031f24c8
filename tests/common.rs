#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use rbooker::db::pool::DbPool;
use rbooker::models::category::Category;
use rbooker::models::person::{MobilityStatus, Person, PersonRole};
use rbooker::models::session::{Cadence, Session, SessionDraft};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rbk() -> Command {
    cargo_bin_cmd!("rbooker")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rbooker.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    // WAL sidecar files from a previous run
    fs::remove_file(format!("{}-wal", db_path)).ok();
    fs::remove_file(format!("{}-shm", db_path)).ok();
    db_path
}

/// Initialize the schema through the CLI (creates tables via migrations)
pub fn init_db(db_path: &str) {
    rbk()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn open(db_path: &str) -> DbPool {
    DbPool::new(db_path).expect("open db")
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("time")
}

/// Store a person in the identity projection via the library API
pub fn seed_person(pool: &DbPool, email: &str, name: &str, role: PersonRole) -> Person {
    let person = Person::new(email, name, role);
    rbooker::db::people::upsert_person(&pool.conn, &person).expect("seed person");
    person
}

pub fn seed_person_with_mobility(
    pool: &DbPool,
    email: &str,
    name: &str,
    role: PersonRole,
    mobility: MobilityStatus,
) -> Person {
    let mut person = Person::new(email, name, role);
    person.mobility = mobility;
    rbooker::db::people::upsert_person(&pool.conn, &person).expect("seed person");
    person
}

/// Schedule a session via the catalog and return it (with its id)
pub fn seed_session(
    pool: &mut DbPool,
    title: &str,
    day: &str,
    from: &str,
    to: &str,
    attendee_capacity: Option<u32>,
    volunteer_capacity: Option<u32>,
    accessible: bool,
) -> Session {
    let draft = SessionDraft {
        title: title.to_string(),
        date: date(day),
        start_time: time(from),
        end_time: time(to),
        location: "Community Hall".to_string(),
        lat: None,
        lon: None,
        category: Category::Social,
        cadence: Cadence::Once,
        attendee_capacity,
        volunteer_capacity,
        accessible,
        needs_payment: false,
        fee_cents: None,
        contact: None,
    };

    rbooker::core::catalog::CatalogLogic::create(pool, &draft).expect("seed session")
}
