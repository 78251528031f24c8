use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rbooker::models::person::PersonRole;

mod common;
use common::{init_db, open, rbk, seed_person, seed_session, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    rbk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    // Tables exist afterwards
    let pool = open(&db_path);
    let count: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table'
             AND name IN ('sessions','bookings','people','notifications','log')",
            [],
            |row| row.get(0),
        )
        .expect("query");
    assert_eq!(count, 5);
}

#[test]
fn test_add_and_list_sessions() {
    let db_path = setup_test_db("cli_add_list");
    init_db(&db_path);

    rbk()
        .args([
            "--db",
            &db_path,
            "--test",
            "add",
            "Tuesday Football",
            "--date",
            "2025-11-04",
            "--from",
            "18:00",
            "--to",
            "19:30",
            "--place",
            "North Pitch",
            "--category",
            "sports",
            "--attendees",
            "14",
            "--volunteers",
            "2",
            "--accessible",
        ])
        .assert()
        .success()
        .stdout(contains("Scheduled 'Tuesday Football'"));

    rbk()
        .args([
            "--db", &db_path, "--test", "add", "Choir Night", "--date", "2025-11-06", "--from",
            "19:00", "--to", "21:00", "--category", "music", "--attendees", "20",
        ])
        .assert()
        .success();

    rbk()
        .args(["--db", &db_path, "--test", "list", "--period", "2025-11"])
        .assert()
        .success()
        .stdout(contains("Tuesday Football").and(contains("Choir Night")));

    // Category filter narrows the listing
    rbk()
        .args([
            "--db", &db_path, "--test", "list", "--period", "2025-11", "--category", "music",
        ])
        .assert()
        .success()
        .stdout(contains("Choir Night").and(contains("Tuesday Football").not()));

    // JSON projection
    rbk()
        .args(["--db", &db_path, "--test", "list", "--json"])
        .assert()
        .success()
        .stdout(contains("\"title\": \"Tuesday Football\""));
}

#[test]
fn test_register_flow_end_to_end() {
    let db_path = setup_test_db("cli_register_flow");
    init_db(&db_path);

    let session_id = {
        let mut pool = open(&db_path);
        seed_session(
            &mut pool, "Park Run", "2025-11-15", "09:00", "10:00", Some(2), None, false,
        )
        .id
    };

    rbk()
        .args([
            "--db",
            &db_path,
            "--test",
            "person",
            "--add",
            "alice@example.com",
            "--name",
            "Alice",
            "--role",
            "participant",
        ])
        .assert()
        .success();

    rbk()
        .args([
            "--db",
            &db_path,
            "--test",
            "register",
            &session_id,
            "--email",
            "alice@example.com",
        ])
        .assert()
        .success()
        .stdout(contains("Registered alice@example.com"));

    // Unknown person: the identity projection is the gatekeeper
    rbk()
        .args([
            "--db",
            &db_path,
            "--test",
            "register",
            &session_id,
            "--email",
            "ghost@example.com",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown person"));

    // Duplicate registration is rejected with the specific reason
    rbk()
        .args([
            "--db",
            &db_path,
            "--test",
            "register",
            &session_id,
            "--email",
            "alice@example.com",
        ])
        .assert()
        .failure()
        .stderr(contains("already holds"));

    rbk()
        .args([
            "--db",
            &db_path,
            "--test",
            "bookings",
            "--session",
            &session_id,
        ])
        .assert()
        .success()
        .stdout(contains("alice@example.com"));

    rbk()
        .args([
            "--db",
            &db_path,
            "--test",
            "unregister",
            &session_id,
            "--email",
            "alice@example.com",
        ])
        .assert()
        .success()
        .stdout(contains("Unregistered alice@example.com"));
}

#[test]
fn test_full_session_rejects_via_cli() {
    let db_path = setup_test_db("cli_session_full");
    init_db(&db_path);

    let session_id = {
        let mut pool = open(&db_path);
        seed_person(&pool, "a@example.com", "A", PersonRole::Participant);
        seed_person(&pool, "b@example.com", "B", PersonRole::Participant);
        seed_session(
            &mut pool, "Tiny Workshop", "2025-11-16", "10:00", "12:00", Some(1), None, false,
        )
        .id
    };

    rbk()
        .args([
            "--db", &db_path, "--test", "register", &session_id, "--email", "a@example.com",
        ])
        .assert()
        .success();

    rbk()
        .args([
            "--db", &db_path, "--test", "register", &session_id, "--email", "b@example.com",
        ])
        .assert()
        .failure()
        .stderr(contains("Session is full"));
}

#[test]
fn test_feature_and_list_featured() {
    let db_path = setup_test_db("cli_feature");
    init_db(&db_path);

    let (a_id, b_id) = {
        let mut pool = open(&db_path);
        let a = seed_session(
            &mut pool, "Featured A", "2025-11-17", "10:00", "11:00", Some(5), None, false,
        );
        let b = seed_session(
            &mut pool, "Featured B", "2025-11-18", "10:00", "11:00", Some(5), None, false,
        );
        (a.id, b.id)
    };

    rbk()
        .args(["--db", &db_path, "--test", "feature", &a_id])
        .assert()
        .success()
        .stdout(contains("is now the featured session"));

    rbk()
        .args(["--db", &db_path, "--test", "feature", &b_id])
        .assert()
        .success();

    rbk()
        .args(["--db", &db_path, "--test", "list", "--featured"])
        .assert()
        .success()
        .stdout(contains("Featured B").and(contains("Featured A").not()));
}

#[test]
fn test_notify_audience_and_inbox() {
    let db_path = setup_test_db("cli_notify");
    init_db(&db_path);

    {
        let pool = open(&db_path);
        seed_person(&pool, "ann@example.com", "Ann", PersonRole::Participant);
        seed_person(&pool, "vic@example.com", "Vic", PersonRole::Volunteer);
    }

    rbk()
        .args(["--db", &db_path, "--test", "audience", "volunteers", "--count"])
        .assert()
        .success()
        .stdout(contains("1"));

    rbk()
        .args([
            "--db",
            &db_path,
            "--test",
            "notify",
            "Help wanted Saturday",
            "--body",
            "Setup crew for the fair.",
            "--kind",
            "signup-request",
            "--audience",
            "volunteers",
            "--by",
            "sam@example.com",
        ])
        .assert()
        .success()
        .stdout(contains("Notification 'Help wanted Saturday' created"));

    rbk()
        .args([
            "--db", &db_path, "--test", "notices", "--for", "vic@example.com",
        ])
        .assert()
        .success()
        .stdout(contains("Help wanted Saturday"));

    // Not in the audience → empty inbox
    rbk()
        .args([
            "--db", &db_path, "--test", "notices", "--for", "ann@example.com",
        ])
        .assert()
        .success()
        .stdout(contains("Inbox is empty"));

    // Expiry must be in the future
    rbk()
        .args([
            "--db",
            &db_path,
            "--test",
            "notify",
            "Too late",
            "--by",
            "sam@example.com",
            "--expires",
            "2020-01-01 00:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Expiry must be in the future"));
}

#[test]
fn test_db_reconcile_cli() {
    let db_path = setup_test_db("cli_reconcile");
    init_db(&db_path);

    {
        let mut pool = open(&db_path);
        seed_session(
            &mut pool, "Clean Sweep", "2025-11-19", "10:00", "11:00", Some(4), None, false,
        );
    }

    rbk()
        .args(["--db", &db_path, "--test", "db", "--reconcile"])
        .assert()
        .success()
        .stdout(contains("Seat counters match live bookings"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db(&db_path);

    rbk()
        .args([
            "--db", &db_path, "--test", "add", "Logged Session", "--date", "2025-11-25", "--from",
            "10:00", "--to", "11:00", "--attendees", "5",
        ])
        .assert()
        .success();

    rbk()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("sched")));
}
