//! Person profile: the identity projection consumed (not owned) by the core.
//! The `person` CLI command is the stand-in for the identity collaborator
//! that supplies this tuple per request.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PersonRole {
    Participant,
    Volunteer,
    Staff,
}

impl PersonRole {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PersonRole::Participant => "participant",
            PersonRole::Volunteer => "volunteer",
            PersonRole::Staff => "staff",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "participant" => Some(PersonRole::Participant),
            "volunteer" => Some(PersonRole::Volunteer),
            "staff" => Some(PersonRole::Staff),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        PersonRole::from_db_str(&code.to_lowercase())
    }
}

/// Mobility status from the profile. The two restricted statuses both
/// require an accessible venue when booking as attendee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MobilityStatus {
    Unrestricted,
    NoLongWalks, // cannot walk long distances
    NoWalking,   // cannot walk
}

impl MobilityStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MobilityStatus::Unrestricted => "unrestricted",
            MobilityStatus::NoLongWalks => "no_long_walks",
            MobilityStatus::NoWalking => "no_walking",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "unrestricted" => Some(MobilityStatus::Unrestricted),
            "no_long_walks" => Some(MobilityStatus::NoLongWalks),
            "no_walking" => Some(MobilityStatus::NoWalking),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        MobilityStatus::from_db_str(&code.to_lowercase().replace('-', "_"))
    }

    pub fn requires_accessible(&self) -> bool {
        matches!(self, MobilityStatus::NoLongWalks | MobilityStatus::NoWalking)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub email: String,             // ⇔ people.email (PK, person reference)
    pub name: String,              // ⇔ people.name
    pub role: PersonRole,          // ⇔ people.role
    pub mobility: MobilityStatus,  // ⇔ people.mobility
    pub home_lat: Option<f64>,     // ⇔ people.home_lat (stored as given)
    pub home_lon: Option<f64>,     // ⇔ people.home_lon
    pub tags: String,              // ⇔ people.tags (comma list)
    pub onboarded: bool,           // ⇔ people.onboarded
    pub created_at: String,        // ⇔ people.created_at (ISO8601)
}

impl Person {
    pub fn new(email: &str, name: &str, role: PersonRole) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
            role,
            mobility: MobilityStatus::Unrestricted,
            home_lat: None,
            home_lon: None,
            tags: String::new(),
            onboarded: false,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }
}
