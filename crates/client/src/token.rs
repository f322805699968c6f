//! Bearer credential storage.
//!
//! The [`TokenStore`] is the sole source of truth for "is a user
//! authenticated". It is an explicit, injectable object handed to the
//! gateway and the session manager, and its changes are observable through
//! a watch channel so that every dependent component (cart mirror, UI
//! shell, another window) learns about logins and logouts without a
//! storage-event side channel.
//!
//! No token shape or expiry validation happens here; the backend's 401 is
//! the only authority on credential validity.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;

/// An opaque bearer credential.
///
/// `Debug` output is redacted; use [`Credential::token`] at the single
/// point where the header is written.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wrap a bearer token received from the auth endpoints.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the raw token for the `Authorization` header.
    #[must_use]
    pub fn token(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.token() == other.token()
    }
}

impl Eq for Credential {}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

/// Process-wide credential store with an observer feed.
///
/// Cheap to clone; all clones share one slot. At most one credential is
/// active at a time: `set` replaces, `clear` removes, and both notify
/// every subscriber.
#[derive(Clone)]
pub struct TokenStore {
    inner: Arc<TokenStoreInner>,
}

struct TokenStoreInner {
    credential: watch::Sender<Option<Credential>>,
}

impl TokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (credential, _) = watch::channel(None);
        Self {
            inner: Arc::new(TokenStoreInner { credential }),
        }
    }

    /// Create a store seeded with a persisted credential.
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        let store = Self::new();
        store.set(credential);
        store
    }

    /// Current credential, if any.
    #[must_use]
    pub fn get(&self) -> Option<Credential> {
        self.inner.credential.borrow().clone()
    }

    /// Store a credential, replacing any previous one.
    pub fn set(&self, credential: Credential) {
        self.inner.credential.send_replace(Some(credential));
    }

    /// Remove the credential.
    pub fn clear(&self) {
        self.inner.credential.send_replace(None);
    }

    /// Subscribe to credential changes.
    ///
    /// The receiver yields the new value after every `set` and `clear`,
    /// including ones made by other holders of this store.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Option<Credential>> {
        self.inner.credential.subscribe()
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
