//! # cb-store
//!
//! Typed persistence on top of the raw `KeyValueStore` port, plus the two
//! small fixed-key stores (theme preference, auth session).
//!
//! `TypedStore::load` never fails: an absent key or corrupted JSON falls back
//! to the caller-supplied default. Silent fallback is deliberate and matches
//! the original storage layer; the data-loss consequence is covered by tests.

use cb_core::keys;
use cb_core::models::Session;
use cb_core::traits::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// JSON (de)serializing adapter over a shared `KeyValueStore`.
#[derive(Clone)]
pub struct TypedStore {
    inner: Arc<dyn KeyValueStore>,
}

impl TypedStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    /// Serializes `value` and overwrites whatever was stored under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.inner.set(key, &json),
            // Only reachable for non-serializable values (e.g. NaN map keys);
            // logged and dropped like any other storage write failure.
            Err(err) => tracing::warn!(key, %err, "failed to serialize value, not persisted"),
        }
    }

    /// Returns the value stored under `key`, or `default` when the key is
    /// absent or its contents no longer deserialize.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.inner.get(key) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key, %err, "corrupted value, falling back to default");
                    default
                }
            },
            None => default,
        }
    }

    pub fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

/// Global UI preference, independent of any asset id.
#[derive(Clone)]
pub struct PreferenceStore {
    store: TypedStore,
}

impl PreferenceStore {
    pub fn new(store: TypedStore) -> Self {
        Self { store }
    }

    /// Defaults to light mode when nothing has been persisted yet.
    pub fn dark_mode(&self) -> bool {
        self.store.load(keys::THEME_DARK_MODE, false)
    }

    pub fn set_dark_mode(&self, enabled: bool) {
        self.store.save(keys::THEME_DARK_MODE, &enabled);
    }
}

/// Locally persisted sign-in state: token, display name and email under
/// three fixed keys, written together on sign-in and cleared on sign-out.
#[derive(Clone)]
pub struct SessionStore {
    store: TypedStore,
}

impl SessionStore {
    pub fn new(store: TypedStore) -> Self {
        Self { store }
    }

    pub fn save(&self, session: &Session) {
        self.store.save(keys::AUTH_TOKEN, &session.token);
        self.store.save(keys::USER_PSEUDO, &session.pseudo);
        self.store.save(keys::USER_EMAIL, &session.email);
    }

    /// A session is only usable when all three fields are present.
    pub fn load(&self) -> Option<Session> {
        let token: Option<String> = self.store.load(keys::AUTH_TOKEN, None);
        let pseudo: Option<String> = self.store.load(keys::USER_PSEUDO, None);
        let email: Option<String> = self.store.load(keys::USER_EMAIL, None);
        Some(Session {
            token: token?,
            pseudo: pseudo?,
            email: email?,
        })
    }

    pub fn clear(&self) {
        self.store.remove(keys::AUTH_TOKEN);
        self.store.remove(keys::USER_PSEUDO);
        self.store.remove(keys::USER_EMAIL);
    }
}
