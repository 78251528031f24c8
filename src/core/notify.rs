//! Notification store: creation, visibility, read-state, deletion.
//!
//! Audience membership is resolved lazily at read time, so a volunteer who
//! crosses the experience threshold after a notification was sent still
//! sees it on their next inbox read.

use crate::core::audience::AudienceLogic;
use crate::db::log::ttlog;
use crate::db::notifications as store;
use crate::db::pool::{DbPool, with_retry};
use crate::errors::{AppError, AppResult};
use crate::models::audience::Audience;
use crate::models::notification::{Notification, NotificationDraft};
use chrono::Local;
use rusqlite::TransactionBehavior;
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

pub struct NotifyLogic;

impl NotifyLogic {
    /// Create a notification. Expiry, when given, must be strictly in the
    /// future at creation time.
    pub fn create(pool: &mut DbPool, draft: &NotificationDraft) -> AppResult<Notification> {
        if draft.title.trim().is_empty() {
            return Err(AppError::Validation("Notification title is empty.".into()));
        }

        if let Some(expires) = draft.expires_at
            && expires <= Local::now()
        {
            return Err(AppError::InvalidExpiry(
                expires.format("%Y-%m-%d %H:%M").to_string(),
            ));
        }

        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            kind: draft.kind,
            audience: draft.audience,
            session_id: draft.session_id.clone(),
            created_by: draft.created_by.clone(),
            created_at: Local::now().to_rfc3339(),
            expires_at: draft.expires_at.map(|e| e.to_rfc3339()),
        };

        with_retry(|| {
            let tx = pool
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;
            store::insert_notification(&tx, &notification)?;
            ttlog(
                &tx,
                "notify",
                &notification.id,
                &format!(
                    "'{}' to {}",
                    notification.title,
                    notification.audience.to_db_str()
                ),
            )?;
            tx.commit()?;
            Ok(())
        })?;

        Ok(notification)
    }

    pub fn is_expired(n: &Notification) -> bool {
        match &n.expires_at {
            Some(raw) => chrono::DateTime::parse_from_rfc3339(raw)
                .map(|e| e.with_timezone(&Local) <= Local::now())
                .unwrap_or(false),
            None => false,
        }
    }

    /// Visible = not expired AND the person is in the resolved audience.
    pub fn visible_to(pool: &mut DbPool, n: &Notification, email: &str) -> AppResult<bool> {
        if Self::is_expired(n) {
            return Ok(false);
        }

        let recipients = AudienceLogic::resolve(&pool.conn, n.audience)?;
        Ok(recipients.contains(email))
    }

    /// Everything currently visible to a recipient, newest first. Resolves
    /// each distinct selector once per call.
    pub fn inbox(
        pool: &mut DbPool,
        email: &str,
        include_expired: bool,
    ) -> AppResult<Vec<(Notification, bool)>> {
        let all = store::load_notifications(&pool.conn)?;

        let mut resolved: HashMap<Audience, BTreeSet<String>> = HashMap::new();

        let mut out = Vec::new();
        for n in all {
            if !include_expired && Self::is_expired(&n) {
                continue;
            }

            if !resolved.contains_key(&n.audience) {
                let r = AudienceLogic::resolve(&pool.conn, n.audience)?;
                resolved.insert(n.audience, r);
            }
            let Some(recipients) = resolved.get(&n.audience) else {
                continue;
            };

            if !recipients.contains(email) {
                continue;
            }

            let read = store::has_read(&pool.conn, &n.id, email)?;
            out.push((n, read));
        }

        Ok(out)
    }

    /// Idempotent: marking an already-read notification is a no-op.
    pub fn mark_read(pool: &mut DbPool, notification_id: &str, email: &str) -> AppResult<()> {
        with_retry(|| {
            // Existence check so a bad id is an error, not a silent insert.
            store::load_notification(&pool.conn, notification_id)?;

            let newly = store::mark_read(&pool.conn, notification_id, email)?;
            if newly {
                ttlog(&pool.conn, "read", notification_id, email)?;
            }

            Ok(())
        })
    }

    /// Hard delete; read-state rows go with the notification.
    pub fn delete(pool: &mut DbPool, notification_id: &str) -> AppResult<()> {
        with_retry(|| {
            let changed = store::delete_notification(&pool.conn, notification_id)?;
            if changed == 0 {
                return Err(AppError::NotificationNotFound(notification_id.to_string()));
            }

            ttlog(&pool.conn, "unnotify", notification_id, "deleted")?;
            Ok(())
        })
    }
}
