//! Deduplicated, time-aware notification feed for the active account.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::analyzer::NutritionAnalyzer;
use crate::state::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    System,
    Update,
    Insight,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub is_read: bool,
}

impl Notification {
    fn fresh(
        kind: NotificationKind,
        id: String,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            message: message.into(),
            kind,
            timestamp: OffsetDateTime::now_utc(),
            is_read: false,
        }
    }

    /// System event (meal logged, note added). Fresh unique id per event;
    /// never deduplicated.
    pub fn system(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::fresh(
            NotificationKind::System,
            format!("event-{}", Uuid::new_v4()),
            title,
            message,
        )
    }
}

/// Prepend a notification (feed is newest-first). Update announcements carry
/// a stable per-version id; re-adding one already in the feed is a no-op.
pub fn add(session: &mut Session, notification: Notification) {
    if notification.kind == NotificationKind::Update
        && session
            .notifications
            .iter()
            .any(|n| n.id == notification.id)
    {
        debug!(id = %notification.id, "update announcement already in feed");
        return;
    }
    session.notifications.insert(0, notification);
    session.sync();
}

/// One-time-per-version app announcement. Safe to run on every cold start
/// and after every snapshot restore; the stable id keeps it unique.
pub fn announce_update(session: &mut Session) {
    let version = session.app_version().to_string();
    add(
        session,
        Notification::fresh(
            NotificationKind::Update,
            format!("update-v{version}"),
            format!("App updated to v{version}"),
            "We added a new notifications center. Check back here for AI insights and daily tips.",
        ),
    );
}

/// At most one insight per account per UTC calendar day. Analyzer failures
/// are logged and add nothing; the user retries by signing in again.
pub async fn generate_daily_insight(
    session: &mut Session,
    analyzer: &dyn NutritionAnalyzer,
) -> bool {
    let today = OffsetDateTime::now_utc().date();
    let already_delivered = session
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Insight && n.timestamp.date() == today);
    if already_delivered {
        debug!("daily insight already delivered today");
        return false;
    }

    let generated = analyzer.generate_daily_insight(&session.profile).await;
    match generated {
        Ok(insight) => {
            add(
                session,
                Notification::fresh(
                    NotificationKind::Insight,
                    format!("insight-{}", Uuid::new_v4()),
                    insight.title,
                    insight.message,
                ),
            );
            true
        }
        Err(e) => {
            warn!(error = %e, "daily insight generation failed");
            false
        }
    }
}

/// Idempotent: re-marking a read notification changes nothing.
pub fn mark_read(session: &mut Session, id: &str) {
    let mut changed = false;
    for notification in session.notifications.iter_mut() {
        if notification.id == id && !notification.is_read {
            notification.is_read = true;
            changed = true;
        }
    }
    if changed {
        session.sync();
    }
}

/// Removes every notification for the active account, read or not.
pub fn clear_all(session: &mut Session) {
    session.notifications.clear();
    session.sync();
}

/// Badge count.
pub fn unread_count(session: &Session) -> usize {
    session
        .notifications
        .iter()
        .filter(|n| !n.is_read)
        .count()
}
