use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::notify::NotifyLogic;
use crate::db::pool::DbPool;
use crate::db::sessions;
use crate::errors::{AppError, AppResult};
use crate::models::audience::Audience;
use crate::models::notification::{NotificationDraft, NotificationKind};
use crate::ui::messages::success;
use chrono::{Local, NaiveDateTime, TimeZone};

fn parse_expiry(s: &str) -> AppResult<chrono::DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|_| AppError::InvalidExpiry(s.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| AppError::InvalidExpiry(s.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Notify {
        title,
        body,
        kind,
        audience,
        session,
        expires,
        by,
    } = cmd
    {
        let kind = match kind {
            Some(k) => NotificationKind::from_code(k)
                .ok_or_else(|| AppError::Validation(format!("Invalid kind: {}", k)))?,
            None => NotificationKind::Announcement,
        };

        let audience = match audience {
            Some(a) => {
                Audience::from_code(a).ok_or_else(|| AppError::InvalidAudience(a.clone()))?
            }
            None => Audience::All,
        };

        let expires_at = match expires {
            Some(s) => Some(parse_expiry(s)?),
            None => None,
        };

        let mut pool = DbPool::new(&cfg.database)?;

        // A linked session must exist at creation time.
        if let Some(sid) = session {
            sessions::load_session(&pool.conn, sid)?;
        }

        let draft = NotificationDraft {
            title: title.clone(),
            body: body.clone(),
            kind,
            audience,
            session_id: session.clone(),
            created_by: by.clone(),
            expires_at,
        };

        let notification = NotifyLogic::create(&mut pool, &draft)?;

        success(format!(
            "Notification '{}' created for {}. Id: {}",
            notification.title,
            notification.audience.to_db_str(),
            notification.id
        ));
    }

    Ok(())
}
