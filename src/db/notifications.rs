use crate::errors::{AppError, AppResult};
use crate::models::audience::Audience;
use crate::models::notification::{Notification, NotificationKind};
use chrono::Local;
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub fn map_row(row: &Row) -> Result<Notification> {
    let kind_str: String = row.get("kind")?;
    let kind = NotificationKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!("Invalid kind: {}", kind_str))),
        )
    })?;

    let audience_str: String = row.get("audience")?;
    let audience = Audience::from_db_str(&audience_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidAudience(audience_str.clone())),
        )
    })?;

    Ok(Notification {
        id: row.get("id")?,
        title: row.get("title")?,
        body: row.get("body")?,
        kind,
        audience,
        session_id: row.get("session_id")?,
        created_by: row.get("created_by")?,
        created_at: row.get("created_at")?,
        expires_at: row.get("expires_at")?,
    })
}

pub fn insert_notification(conn: &Connection, n: &Notification) -> AppResult<()> {
    conn.execute(
        "INSERT INTO notifications (id, title, body, kind, audience, session_id,
                                    created_by, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            n.id,
            n.title,
            n.body,
            n.kind.to_db_str(),
            n.audience.to_db_str(),
            n.session_id,
            n.created_by,
            n.created_at,
            n.expires_at,
        ],
    )?;
    Ok(())
}

pub fn load_notification(conn: &Connection, id: &str) -> AppResult<Notification> {
    let mut stmt = conn.prepare("SELECT * FROM notifications WHERE id = ?1")?;

    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotificationNotFound(id.to_string()))
}

pub fn load_notifications(conn: &Connection) -> AppResult<Vec<Notification>> {
    let mut stmt = conn.prepare("SELECT * FROM notifications ORDER BY created_at DESC")?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Hard delete: the notification row and its read-state rows go together.
pub fn delete_notification(conn: &Connection, id: &str) -> AppResult<usize> {
    conn.execute("DELETE FROM notification_reads WHERE notification_id = ?1", [id])?;
    let changed = conn.execute("DELETE FROM notifications WHERE id = ?1", [id])?;
    Ok(changed)
}

/// Record a read. INSERT OR IGNORE makes a repeat read a no-op, not an error.
/// Returns true when the read-state row was newly created.
pub fn mark_read(conn: &Connection, notification_id: &str, email: &str) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO notification_reads (notification_id, email, read_at)
         VALUES (?1, ?2, ?3)",
        params![notification_id, email, Local::now().to_rfc3339()],
    )?;
    Ok(changed == 1)
}

pub fn has_read(conn: &Connection, notification_id: &str, email: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM notification_reads WHERE notification_id = ?1 AND email = ?2",
    )?;
    Ok(stmt.exists(params![notification_id, email])?)
}

pub fn read_count(conn: &Connection, notification_id: &str) -> AppResult<u32> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM notification_reads WHERE notification_id = ?1",
        [notification_id],
        |row| row.get(0),
    )?;
    Ok(count)
}
