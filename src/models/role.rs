use serde::Serialize;

/// Role a person plays inside one booking.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ActivityRole {
    Attendee,
    Volunteer,
}

impl ActivityRole {
    pub fn ar_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "attendee" => Some(Self::Attendee),
            "volunteer" => Some(Self::Volunteer),
            _ => None,
        }
    }

    pub fn ar_as_str(&self) -> &'static str {
        match self {
            ActivityRole::Attendee => "attendee",
            ActivityRole::Volunteer => "volunteer",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.ar_as_str()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "attendee" => Some(ActivityRole::Attendee),
            "volunteer" => Some(ActivityRole::Volunteer),
            _ => None,
        }
    }

    pub fn is_attendee(&self) -> bool {
        matches!(self, ActivityRole::Attendee)
    }
}
