use super::category::Category;
use super::role::ActivityRole;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Recurrence label shown on the calendar; purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cadence {
    Once,
    Weekly,
    Biweekly,
    Monthly,
}

impl Cadence {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Cadence::Once => "once",
            Cadence::Weekly => "weekly",
            Cadence::Biweekly => "biweekly",
            Cadence::Monthly => "monthly",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "once" => Some(Cadence::Once),
            "weekly" => Some(Cadence::Weekly),
            "biweekly" => Some(Cadence::Biweekly),
            "monthly" => Some(Cadence::Monthly),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Cadence::from_db_str(&code.to_lowercase())
    }
}

/// Capacity bookkeeping for one offered role.
/// Invariant: 0 <= seats <= capacity. Only the capacity ledger mutates
/// `seats` once the session exists.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleSeats {
    pub capacity: u32, // ⇔ sessions.<role>_capacity
    pub seats: u32,    // ⇔ sessions.<role>_seats (remaining, not taken)
}

impl RoleSeats {
    pub fn booked(&self) -> u32 {
        self.capacity - self.seats
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: String,                  // ⇔ sessions.id (uuid v4)
    pub title: String,               // ⇔ sessions.title
    pub date: NaiveDate,             // ⇔ sessions.date (TEXT "YYYY-MM-DD")
    pub start_time: NaiveTime,       // ⇔ sessions.start_time (TEXT "HH:MM")
    pub end_time: NaiveTime,         // ⇔ sessions.end_time (TEXT "HH:MM")
    pub location: String,            // ⇔ sessions.location
    pub lat: Option<f64>,            // ⇔ sessions.lat (geocoder output, stored verbatim)
    pub lon: Option<f64>,            // ⇔ sessions.lon
    pub category: Category,          // ⇔ sessions.category
    pub cadence: Cadence,            // ⇔ sessions.cadence
    pub attendees: Option<RoleSeats>, // None = role not offered
    pub volunteers: Option<RoleSeats>,
    pub accessible: bool,            // ⇔ sessions.accessible
    pub needs_payment: bool,         // ⇔ sessions.needs_payment
    pub fee_cents: Option<i64>,      // ⇔ sessions.fee_cents
    pub contact: Option<String>,     // ⇔ sessions.contact_email (staff)
    pub featured: bool,              // ⇔ sessions.featured (at most one row)
    pub created_at: String,          // ⇔ sessions.created_at (ISO8601)
}

impl Session {
    pub fn role_seats(&self, role: ActivityRole) -> Option<&RoleSeats> {
        match role {
            ActivityRole::Attendee => self.attendees.as_ref(),
            ActivityRole::Volunteer => self.volunteers.as_ref(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_time.format("%H:%M").to_string()
    }
}

/// What the scheduling collaborator hands over to `catalog::create`.
/// A draft is not a Session until published; the core never sees
/// client-held templates.
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub category: Category,
    pub cadence: Cadence,
    pub attendee_capacity: Option<u32>,
    pub volunteer_capacity: Option<u32>,
    pub accessible: bool,
    pub needs_payment: bool,
    pub fee_cents: Option<i64>,
    pub contact: Option<String>,
}

/// Partial update for `catalog::update`. None = leave unchanged.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub category: Option<Category>,
    pub cadence: Option<Cadence>,
    pub attendee_capacity: Option<u32>,
    pub volunteer_capacity: Option<u32>,
    pub accessible: Option<bool>,
    pub needs_payment: Option<bool>,
    pub fee_cents: Option<i64>,
    pub contact: Option<String>,
}
