use super::role::ActivityRole;
use serde::Serialize;

/// Membership/cadence preference declared at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Membership {
    DropIn,
    Member,
    Trial,
}

impl Membership {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Membership::DropIn => "drop_in",
            Membership::Member => "member",
            Membership::Trial => "trial",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "drop_in" => Some(Membership::DropIn),
            "member" => Some(Membership::Member),
            "trial" => Some(Membership::Trial),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Membership::from_db_str(&code.to_lowercase().replace('-', "_"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: String,              // ⇔ bookings.id (uuid v4)
    pub session_id: String,      // ⇔ bookings.session_id
    pub name: String,            // ⇔ bookings.name
    pub email: String,           // ⇔ bookings.email
    pub role: ActivityRole,      // ⇔ bookings.role ('attendee' | 'volunteer')
    pub membership: Membership,  // ⇔ bookings.membership
    pub needs_accessible: bool,  // ⇔ bookings.needs_accessible
    pub needs_payment: bool,     // ⇔ bookings.needs_payment
    pub note: String,            // ⇔ bookings.note
    pub attended: bool,          // ⇔ bookings.attended (staff-set afterwards)
    pub created_at: String,      // ⇔ bookings.created_at (ISO8601)
}

/// Registration details beyond the identity tuple.
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub membership: Membership,
    pub needs_payment: bool,
    pub note: String,
}

impl Default for BookingDetails {
    fn default() -> Self {
        Self {
            membership: Membership::DropIn,
            needs_payment: false,
            note: String::new(),
        }
    }
}
