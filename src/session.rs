//! Client-side session state: access token, signed-in flag and user email.
//!
//! This only gates which views are offered. It is not an authorization
//! mechanism; the backend validates the bearer token on every request.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::info;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";
pub const USER_EMAIL_KEY: &str = "userEmail";

/// Key-value storage the session lives in.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// Explicit session lifecycle: `login` establishes it, `logout` tears it down.
#[derive(Debug, Default)]
pub struct SessionContext<S = MemorySessionStore> {
    store: S,
}

impl<S: SessionStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn login(&self, email: &str, access_token: String) {
        self.store.set(ACCESS_TOKEN_KEY, access_token);
        self.store.set(AUTHENTICATED_KEY, "true".to_string());
        self.store.set(USER_EMAIL_KEY, email.to_string());
        info!(email, "session started");
    }

    pub fn logout(&self) {
        for key in [ACCESS_TOKEN_KEY, AUTHENTICATED_KEY, USER_EMAIL_KEY] {
            self.store.remove(key);
        }
        info!("session cleared");
    }

    /// True only when the flag holds exactly `"true"`.
    pub fn is_authenticated(&self) -> bool {
        self.store.get(AUTHENTICATED_KEY).as_deref() == Some("true")
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn user_email(&self) -> Option<String> {
        self.store.get(USER_EMAIL_KEY)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout_cycle() {
        let session = SessionContext::<MemorySessionStore>::default();
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());

        session.login("ada@example.com", "tok-123".to_string());
        assert!(session.is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("tok-123"));
        assert_eq!(session.user_email().as_deref(), Some("ada@example.com"));

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());
        assert!(session.user_email().is_none());
    }

    #[test]
    fn test_flag_must_be_exactly_true() {
        let store = MemorySessionStore::default();
        store.set(AUTHENTICATED_KEY, "yes".to_string());
        let session = SessionContext::new(store);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let store = MemorySessionStore::default();
        store.set(ACCESS_TOKEN_KEY, String::new());
        assert!(SessionContext::new(store).access_token().is_none());
    }
}
