//! SQLite connection pool wrapper (lightweight for CLI usage).
//!
//! Also home of the bounded contention-retry policy: every core operation
//! that can hit SQLITE_BUSY runs through `with_retry`, which retries with
//! linear backoff and then fails with `AppError::Busy` instead of blocking
//! forever.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, ErrorCode, Result};
use std::path::Path;
use std::thread;
use std::time::Duration;

/// How many times a contended operation is re-attempted before `Busy`.
pub const MAX_CONTENTION_RETRIES: u32 = 5;

/// Base backoff between contention retries, multiplied by the attempt number.
const RETRY_BACKOFF_MS: u64 = 20;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;

        // No busy handler: contention surfaces immediately as SQLITE_BUSY
        // and is handled by with_retry, bounded. The WAL journal mode is
        // set once at init time (see db::migrate) and persists in the file.
        conn.busy_timeout(Duration::from_millis(0))?;

        Ok(Self { conn })
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        func(&mut self.conn)
    }
}

fn is_contention(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == ErrorCode::DatabaseBusy || f.code == ErrorCode::DatabaseLocked
    )
}

/// Run `op`, retrying on SQLITE_BUSY / SQLITE_LOCKED up to
/// MAX_CONTENTION_RETRIES times. Business-rule rejections pass through
/// untouched; only lock contention is retried.
pub fn with_retry<T, F>(mut op: F) -> AppResult<T>
where
    F: FnMut() -> AppResult<T>,
{
    let mut attempt: u32 = 0;

    loop {
        match op() {
            Err(AppError::Db(e)) if is_contention(&e) => {
                attempt += 1;
                if attempt > MAX_CONTENTION_RETRIES {
                    return Err(AppError::Busy);
                }
                thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS * u64::from(attempt)));
            }
            other => return other,
        }
    }
}
