//! Freeform journal entries, written by the user or accepted from an AI
//! note suggestion.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::notifications::{self, Notification};
use crate::state::Session;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalNote {
    pub id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Prepend a note and announce it in the feed. Blank content is a no-op.
pub fn add_note(session: &mut Session, content: &str) -> Option<Uuid> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }
    let note = PersonalNote {
        id: Uuid::now_v7(),
        content: content.to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    let id = note.id;
    session.notes.insert(0, note);
    notifications::add(
        session,
        Notification::system("Note added", "Your personal reflection has been saved."),
    );
    Some(id)
}

pub fn delete_note(session: &mut Session, id: Uuid) -> bool {
    let before = session.notes.len();
    session.notes.retain(|n| n.id != id);
    let removed = session.notes.len() != before;
    if removed {
        session.sync();
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationKind;

    #[test]
    fn add_note_trims_prepends_and_notifies() {
        let mut session = Session::in_memory("1.1.0");
        add_note(&mut session, "  meal prep on Sunday  ").expect("note added");
        add_note(&mut session, "buy oats").expect("note added");

        assert_eq!(session.notes.len(), 2);
        assert_eq!(session.notes[0].content, "buy oats");
        assert_eq!(session.notes[1].content, "meal prep on Sunday");
        assert_eq!(
            session
                .notifications
                .iter()
                .filter(|n| n.kind == NotificationKind::System)
                .count(),
            2
        );
    }

    #[test]
    fn blank_content_is_a_no_op() {
        let mut session = Session::in_memory("1.1.0");
        assert_eq!(add_note(&mut session, "   "), None);
        assert!(session.notes.is_empty());
        assert!(session.notifications.is_empty());
    }

    #[test]
    fn delete_removes_exactly_one_note() {
        let mut session = Session::in_memory("1.1.0");
        let keep = add_note(&mut session, "keep me").expect("note added");
        let drop = add_note(&mut session, "drop me").expect("note added");

        assert!(delete_note(&mut session, drop));
        assert!(!delete_note(&mut session, drop));
        assert_eq!(session.notes.len(), 1);
        assert_eq!(session.notes[0].id, keep);
    }
}
