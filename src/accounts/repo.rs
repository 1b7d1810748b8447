use std::collections::HashMap;

use crate::store::{keys, PersistentRecord};

use super::repo_types::AccountSnapshot;

/// Canonical form of the tenant key: trimmed, lowercased. Applied
/// identically at sign-up, sign-in, lookup and the remembered-session
/// pointer so the two paths can never disagree.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Multi-tenant account map plus the remembered-session pointer. Email is
/// the sole tenant key; exactly one snapshot per email.
#[derive(Clone)]
pub struct AccountStore {
    record: PersistentRecord,
}

impl AccountStore {
    pub fn new(record: PersistentRecord) -> Self {
        Self { record }
    }

    fn load_map(&self) -> HashMap<String, AccountSnapshot> {
        self.record.read(keys::ACCOUNTS).unwrap_or_default()
    }

    pub fn find_account(&self, email: &str) -> Option<AccountSnapshot> {
        self.load_map().remove(&normalize_email(email))
    }

    pub fn account_exists(&self, email: &str) -> bool {
        self.load_map().contains_key(&normalize_email(email))
    }

    /// Read-merge-write over the whole map; other tenants' snapshots are
    /// never dropped. Serialization failures are logged by the record layer
    /// and swallowed.
    pub fn upsert_account(&self, email: &str, snapshot: &AccountSnapshot) {
        let mut map = self.load_map();
        map.insert(normalize_email(email), snapshot.clone());
        self.record.write(keys::ACCOUNTS, &map);
    }

    pub fn remember_session(&self, email: &str) {
        self.record.write(keys::LAST_EMAIL, &normalize_email(email));
    }

    pub fn remembered_session(&self) -> Option<String> {
        self.record.read(keys::LAST_EMAIL)
    }

    /// Forgets the pointer only. Sign-out is not account deletion: the
    /// snapshot stays in the map.
    pub fn clear_remembered_session(&self) {
        self.record.remove(keys::LAST_EMAIL);
    }
}
