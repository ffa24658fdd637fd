//! Session context and its storage collaborator.
//!
//! The session is an explicit value owned by the engine. It is loaded from
//! and written through a [`SessionStore`]; store failures are logged and
//! swallowed so they never break a reload or a login.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use tracing::warn;

use crate::error::StoreError;

/// Storage key for the logged-in flag (`"true"` when set).
pub const KEY_LOGGED_IN: &str = "is_logged_in";
/// Storage key for the normalized email of the signed-in user.
pub const KEY_USER_EMAIL: &str = "user_email";
/// Storage key for the last applied reload (RFC 3339).
pub const KEY_LAST_SYNCED: &str = "last_synced_time";

/// Key-value persistence for the session context.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Volatile store, used when nothing should outlive the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.values.clear();
        Ok(())
    }
}

/// Who is signed in and when the catalog was last synced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub logged_in: bool,
    pub user_email: Option<String>,
    pub last_synced: Option<DateTime<Local>>,
}

impl SessionContext {
    /// Reads the session from `store`; unreadable values count as absent.
    pub fn load(store: &dyn SessionStore) -> Self {
        let read = |key: &str| match store.get(key) {
            Ok(value) => value,
            Err(error) => {
                warn!(key, %error, "session store read failed");
                None
            }
        };
        Self {
            logged_in: read(KEY_LOGGED_IN).as_deref() == Some("true"),
            user_email: read(KEY_USER_EMAIL).filter(|email| !email.is_empty()),
            last_synced: read(KEY_LAST_SYNCED)
                .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
                .map(|at| at.with_timezone(&Local)),
        }
    }

    /// Marks the session as signed in and persists it.
    pub fn sign_in(&mut self, email: &str, store: &mut dyn SessionStore) {
        self.logged_in = true;
        self.user_email = Some(email.to_string());
        write_or_warn(store.set(KEY_LOGGED_IN, "true"), KEY_LOGGED_IN);
        write_or_warn(store.set(KEY_USER_EMAIL, email), KEY_USER_EMAIL);
    }

    /// Records a successful sync and persists the timestamp.
    pub fn record_sync(&mut self, at: DateTime<Local>, store: &mut dyn SessionStore) {
        self.last_synced = Some(at);
        write_or_warn(
            store.set(KEY_LAST_SYNCED, &at.to_rfc3339()),
            KEY_LAST_SYNCED,
        );
    }

    /// Forgets everything, in memory and in the store.
    pub fn sign_out(&mut self, store: &mut dyn SessionStore) {
        *self = Self::default();
        write_or_warn(store.clear(), "*");
    }

    /// Friendly name for the signed-in user.
    pub fn display_name(&self) -> Option<String> {
        self.user_email.as_deref().map(display_name)
    }

    /// Last sync time as a short label, or `"Never"`.
    pub fn last_synced_label(&self) -> String {
        self.last_synced
            .map(|at| at.format("%d %b %Y %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string())
    }
}

fn write_or_warn(result: Result<(), StoreError>, key: &str) {
    if let Err(error) = result {
        warn!(key, %error, "session store write failed");
    }
}

/// Derives a greeting name from an email: the local part up to the first
/// `.`, with the first letter uppercased (`john.doe@x.in` -> `John`).
pub fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let primary = local.split('.').next().unwrap_or_default();
    let mut chars = primary.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError("storage unavailable".to_string()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError("storage unavailable".to_string()))
        }
        fn clear(&mut self) -> Result<(), StoreError> {
            Err(StoreError("storage unavailable".to_string()))
        }
    }

    #[test]
    fn display_name_from_email() {
        assert_eq!(display_name("john.doe@example.in"), "John");
        assert_eq!(display_name("priya@example.in"), "Priya");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn sign_in_round_trips_through_store() {
        let mut store = MemoryStore::new();
        let mut session = SessionContext::default();
        session.sign_in("asha@example.in", &mut store);

        let loaded = SessionContext::load(&store);
        assert!(loaded.logged_in);
        assert_eq!(loaded.user_email.as_deref(), Some("asha@example.in"));
        assert_eq!(loaded.display_name().as_deref(), Some("Asha"));
        assert_eq!(loaded.last_synced_label(), "Never");
    }

    #[test]
    fn sync_time_round_trips_through_store() {
        let mut store = MemoryStore::new();
        let mut session = SessionContext::default();
        let at = DateTime::parse_from_rfc3339("2026-10-14T09:30:00+05:30")
            .unwrap()
            .with_timezone(&Local);
        session.record_sync(at, &mut store);

        let loaded = SessionContext::load(&store);
        assert_eq!(loaded.last_synced, Some(at));
    }

    #[test]
    fn sign_out_clears_store() {
        let mut store = MemoryStore::new();
        let mut session = SessionContext::default();
        session.sign_in("asha@example.in", &mut store);
        session.sign_out(&mut store);

        assert_eq!(session, SessionContext::default());
        assert_eq!(store.get(KEY_LOGGED_IN).unwrap(), None);
    }

    #[test]
    fn broken_store_is_swallowed() {
        let mut store = BrokenStore;
        let mut session = SessionContext::load(&store);
        assert!(!session.logged_in);

        session.sign_in("asha@example.in", &mut store);
        assert!(session.logged_in);
        session.sign_out(&mut store);
        assert!(!session.logged_in);
    }
}
