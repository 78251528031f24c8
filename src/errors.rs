//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! Booking rejections (AlreadyBooked, TimingClash, ...) are dedicated
//! variants so the CLI can always render the specific reason. None of them
//! is retried; Busy is the only transient kind and the db layer retries it
//! a bounded number of times before giving up.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid category code: {0}")]
    InvalidCategory(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid audience selector: {0}")]
    InvalidAudience(String),

    #[error("Invalid mobility status: {0}")]
    InvalidMobility(String),

    // ---------------------------
    // Validation (caller's fault, never retried)
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    #[error("Unknown person: {0}")]
    PersonNotFound(String),

    // ---------------------------
    // Booking rejections (surfaced verbatim to the user)
    // ---------------------------
    #[error("{email} already holds a {role} booking for this session")]
    AlreadyBooked { email: String, role: String },

    #[error("{email} holds no {role} booking for this session")]
    NotBooked { email: String, role: String },

    /// Ledger-level exhaustion; the booking resolver surfaces it as
    /// SessionFull.
    #[error("No remaining capacity for role {0}")]
    CapacityExhausted(String),

    #[error("Session is full: no {0} seats remaining")]
    SessionFull(String),

    #[error("Timing clash with '{title}' ({start} - {end}) on the same day")]
    TimingClash {
        title: String,
        start: String,
        end: String,
    },

    #[error("Session venue is not accessible ({0})")]
    AccessibilityMismatch(String),

    // ---------------------------
    // Staff-edit guards (need explicit confirmation or another action)
    // ---------------------------
    #[error("Cannot shrink {role} capacity to {requested}: {booked} seat(s) already booked")]
    CapacityBelowDemand {
        role: String,
        requested: u32,
        booked: u32,
    },

    #[error("Session has {0} booking(s); pass --cascade to delete them too")]
    HasBookings(u32),

    #[error("Expiry must be in the future: {0}")]
    InvalidExpiry(String),

    // ---------------------------
    // Concurrency
    // ---------------------------
    #[error("Database is busy, retries exhausted; try again")]
    Busy,

    /// Defensive: indicates a bookkeeping bug upstream. Logged at high
    /// severity, never auto-corrected.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
