use rusqlite::{Connection, Error, OptionalExtension, Result};

use crate::ui::messages::success;

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if a table has a given column.
fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `sessions` table with the modern schema.
///
/// A NULL capacity means the role is not offered; the CHECK constraints are
/// the schema-level mirror of the seat invariant (0 <= seats <= capacity),
/// and the partial unique index keeps at most one featured row.
fn create_sessions_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id                 TEXT PRIMARY KEY,
            title              TEXT NOT NULL,
            date               TEXT NOT NULL,
            start_time         TEXT NOT NULL,
            end_time           TEXT NOT NULL,
            location           TEXT NOT NULL DEFAULT '',
            lat                REAL,
            lon                REAL,
            category           TEXT NOT NULL DEFAULT 'social'
                               CHECK(category IN ('sports','creative','music','social','education','outdoor')),
            cadence            TEXT NOT NULL DEFAULT 'once'
                               CHECK(cadence IN ('once','weekly','biweekly','monthly')),
            attendee_capacity  INTEGER,
            attendee_seats     INTEGER,
            volunteer_capacity INTEGER,
            volunteer_seats    INTEGER,
            accessible         INTEGER NOT NULL DEFAULT 0,
            needs_payment      INTEGER NOT NULL DEFAULT 0,
            fee_cents          INTEGER,
            contact_email      TEXT,
            featured           INTEGER NOT NULL DEFAULT 0,
            created_at         TEXT NOT NULL,
            CHECK (attendee_seats IS NULL
                   OR (attendee_seats >= 0 AND attendee_seats <= attendee_capacity)),
            CHECK (volunteer_seats IS NULL
                   OR (volunteer_seats >= 0 AND volunteer_seats <= volunteer_capacity))
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(date);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_featured
            ON sessions(featured) WHERE featured = 1;

        CREATE TABLE IF NOT EXISTS session_staff (
            session_id TEXT NOT NULL,
            email      TEXT NOT NULL,
            name       TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (session_id, email)
        );
        "#,
    )?;
    Ok(())
}

/// Create the `bookings` table with the modern schema.
///
/// The unique index on (session_id, email, role) is what makes
/// re-registering a rejection instead of a duplicate.
fn create_bookings_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id               TEXT PRIMARY KEY,
            session_id       TEXT NOT NULL,
            name             TEXT NOT NULL,
            email            TEXT NOT NULL,
            role             TEXT NOT NULL CHECK(role IN ('attendee','volunteer')),
            membership       TEXT NOT NULL DEFAULT 'drop_in'
                             CHECK(membership IN ('drop_in','member','trial')),
            needs_accessible INTEGER NOT NULL DEFAULT 0,
            needs_payment    INTEGER NOT NULL DEFAULT 0,
            note             TEXT DEFAULT '',
            attended         INTEGER NOT NULL DEFAULT 0,
            created_at       TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_live
            ON bookings(session_id, email, role);
        CREATE INDEX IF NOT EXISTS idx_bookings_email ON bookings(email);
        CREATE INDEX IF NOT EXISTS idx_bookings_session ON bookings(session_id);
        "#,
    )?;
    Ok(())
}

/// Create the `people` table (identity projection) with the modern schema.
fn create_people_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS people (
            email      TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            role       TEXT NOT NULL CHECK(role IN ('participant','volunteer','staff')),
            mobility   TEXT NOT NULL DEFAULT 'unrestricted'
                       CHECK(mobility IN ('unrestricted','no_long_walks','no_walking')),
            home_lat   REAL,
            home_lon   REAL,
            tags       TEXT DEFAULT '',
            onboarded  INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `notifications` tables with the modern schema.
fn create_notifications_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id         TEXT PRIMARY KEY,
            title      TEXT NOT NULL,
            body       TEXT NOT NULL DEFAULT '',
            kind       TEXT NOT NULL
                       CHECK(kind IN ('reminder','signup_request','announcement')),
            audience   TEXT NOT NULL
                       CHECK(audience IN ('all','participants','volunteers','experienced_volunteers')),
            session_id TEXT,
            created_by TEXT NOT NULL,
            created_at TEXT NOT NULL,
            expires_at TEXT
        );

        CREATE TABLE IF NOT EXISTS notification_reads (
            notification_id TEXT NOT NULL,
            email           TEXT NOT NULL,
            read_at         TEXT NOT NULL,
            PRIMARY KEY (notification_id, email)
        );
        "#,
    )?;
    Ok(())
}

/// Add the `cadence` column to session rows written before 0.3.0.
fn migrate_add_cadence_to_sessions(conn: &Connection) -> Result<()> {
    let version = "20250512_0007_add_session_cadence";

    // 1) Already applied?
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if table_has_column(conn, "sessions", "cadence")? {
        // Modern schema created directly; just record the marker.
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'Schema already current')",
            [version],
        )?;
        return Ok(());
    }

    // 2) Apply
    conn.execute(
        "ALTER TABLE sessions ADD COLUMN cadence TEXT NOT NULL DEFAULT 'once';",
        [],
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to add 'cadence' column: {}", e)),
        )
    })?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added cadence label to sessions')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'cadence' to sessions table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 0) WAL keeps readers unblocked while one writer holds the lock.
    //    Persistent once set on the file.
    let _mode: String = conn.query_row("PRAGMA journal_mode=WAL;", [], |row| row.get(0))?;

    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create collections when missing
    let fresh = !table_exists(conn, "sessions")?;

    create_sessions_table(conn)?;
    create_bookings_table(conn)?;
    create_people_table(conn)?;
    create_notifications_tables(conn)?;

    if fresh {
        success("Created booking tables (modern schema).");
    }

    // 3) Column-level upgrades for older databases
    migrate_add_cadence_to_sessions(conn)?;

    Ok(())
}
