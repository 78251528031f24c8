use super::audience::Audience;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    Reminder,
    SignupRequest,
    Announcement,
}

impl NotificationKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            NotificationKind::Reminder => "reminder",
            NotificationKind::SignupRequest => "signup_request",
            NotificationKind::Announcement => "announcement",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "reminder" => Some(NotificationKind::Reminder),
            "signup_request" => Some(NotificationKind::SignupRequest),
            "announcement" => Some(NotificationKind::Announcement),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        NotificationKind::from_db_str(&code.to_lowercase().replace('-', "_"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,                  // ⇔ notifications.id (uuid v4)
    pub title: String,               // ⇔ notifications.title
    pub body: String,                // ⇔ notifications.body
    pub kind: NotificationKind,      // ⇔ notifications.kind
    pub audience: Audience,          // ⇔ notifications.audience
    pub session_id: Option<String>,  // ⇔ notifications.session_id (optional link)
    pub created_by: String,          // ⇔ notifications.created_by (staff email)
    pub created_at: String,          // ⇔ notifications.created_at (ISO8601)
    pub expires_at: Option<String>,  // ⇔ notifications.expires_at (ISO8601)
}

/// What the composing staff member submits to `notify::create`.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    pub audience: Audience,
    pub session_id: Option<String>,
    pub created_by: String,
    pub expires_at: Option<chrono::DateTime<chrono::Local>>,
}
