use serde::Serialize;

/// Named audience selector used to compute notification recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Audience {
    All,
    Participants,
    Volunteers,
    ExperiencedVolunteers,
}

impl Audience {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Audience::All => "all",
            Audience::Participants => "participants",
            Audience::Volunteers => "volunteers",
            Audience::ExperiencedVolunteers => "experienced_volunteers",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Audience::All),
            "participants" => Some(Audience::Participants),
            "volunteers" => Some(Audience::Volunteers),
            "experienced_volunteers" => Some(Audience::ExperiencedVolunteers),
            _ => None,
        }
    }

    /// Helper: convert input from CLI (dash or underscore separator)
    pub fn from_code(code: &str) -> Option<Self> {
        Audience::from_db_str(&code.to_lowercase().replace('-', "_"))
    }
}
