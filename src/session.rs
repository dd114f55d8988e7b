//! Session store.
//!
//! Holds the bearer token, user id, username and role in a key/value backend
//! (browser storage in the app, [`MemoryStore`] elsewhere). The store is an
//! explicit object handed to whoever needs it; there is no global session.

use campus_shared::Role;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const KEY_TOKEN: &str = "token";
pub const KEY_USER_ID: &str = "userId";
pub const KEY_USERNAME: &str = "username";
pub const KEY_ROLE: &str = "role";

const ALL_KEYS: [&str; 4] = [KEY_TOKEN, KEY_USER_ID, KEY_USERNAME, KEY_ROLE];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session storage is unavailable")]
    Unavailable,
    #[error("failed to write session key `{0}`")]
    Write(String),
}

/// Minimal string key/value backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str);
}

/// In-memory backend. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// A complete session as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Persists the whole session. If any write fails, every key is removed
    /// again, so readers see either the new session or none.
    pub fn set_session(
        &self,
        token: &str,
        user_id: &str,
        username: &str,
        role: Role,
    ) -> Result<(), SessionError> {
        let entries = [
            (KEY_TOKEN, token),
            (KEY_USER_ID, user_id),
            (KEY_USERNAME, username),
            (KEY_ROLE, role.as_str()),
        ];
        for (key, value) in entries {
            if let Err(err) = self.backend.set(key, value) {
                self.clear_session();
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn clear_session(&self) {
        for key in ALL_KEYS {
            self.backend.remove(key);
        }
    }

    pub fn token(&self) -> Option<String> {
        self.backend.get(KEY_TOKEN).filter(|t| !t.is_empty())
    }

    pub fn user_id(&self) -> Option<String> {
        self.backend.get(KEY_USER_ID)
    }

    pub fn username(&self) -> Option<String> {
        self.backend.get(KEY_USERNAME)
    }

    /// `None` when absent or not a role this client knows.
    pub fn role(&self) -> Option<Role> {
        self.backend.get(KEY_ROLE).as_deref().and_then(Role::parse)
    }

    /// Token present and non-empty. Expiry is only discovered by a failing call.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn snapshot(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user_id: self.user_id()?,
            username: self.username()?,
            role: self.role()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Backend whose n-th write fails.
    struct FlakyStore {
        inner: MemoryStore,
        fail_on: usize,
        writes: Cell<usize>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
            let n = self.writes.get() + 1;
            self.writes.set(n);
            if n == self.fail_on {
                return Err(SessionError::Write(key.to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) {
            self.inner.remove(key)
        }
    }

    #[test]
    fn set_then_read_back() {
        let store = SessionStore::new(MemoryStore::new());
        store.set_session("tok", "u-1", "ana", Role::Student).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.user_id().as_deref(), Some("u-1"));
        assert_eq!(store.username().as_deref(), Some("ana"));
        assert_eq!(store.role(), Some(Role::Student));
        assert_eq!(
            store.snapshot(),
            Some(Session {
                token: "tok".into(),
                user_id: "u-1".into(),
                username: "ana".into(),
                role: Role::Student,
            })
        );
    }

    #[test]
    fn clear_always_deauthenticates() {
        let store = SessionStore::new(MemoryStore::new());
        store.clear_session();
        assert!(!store.is_authenticated());

        store.set_session("tok", "u-1", "ana", Role::Admin).unwrap();
        store.clear_session();
        assert!(!store.is_authenticated());
        assert_eq!(store.role(), None);
        assert_eq!(store.snapshot(), None);
    }

    #[test]
    fn empty_token_is_not_authenticated() {
        let backend = MemoryStore::new();
        backend.set(KEY_TOKEN, "").unwrap();
        let store = SessionStore::new(backend);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn unknown_role_reads_as_none() {
        let backend = MemoryStore::new();
        backend.set(KEY_ROLE, "janitor").unwrap();
        assert_eq!(SessionStore::new(backend).role(), None);
    }

    #[test]
    fn failed_write_leaves_no_partial_session() {
        let store = SessionStore::new(FlakyStore {
            inner: MemoryStore::new(),
            fail_on: 3,
            writes: Cell::new(0),
        });
        assert!(store.set_session("tok", "u-1", "ana", Role::Admin).is_err());
        assert!(!store.is_authenticated());
        assert_eq!(store.user_id(), None);
    }

    #[test]
    fn reads_have_no_side_effects() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        store.set_session("tok", "u-1", "ana", Role::Admin).unwrap();
        for _ in 0..3 {
            let _ = store.snapshot();
            let _ = store.is_authenticated();
        }
        assert_eq!(backend.get(KEY_TOKEN).as_deref(), Some("tok"));
    }
}
