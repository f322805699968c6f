//! Session state derived from the credential and the identity endpoint.
//!
//! State machine: `Loading -> Authenticated(user) | Anonymous`, with both
//! terminal states re-enterable through [`SessionManager::login`] and
//! [`SessionManager::logout`]. The role always comes from the backend's
//! identity response, never from client input.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use pomade_core::{Role, UserRecord};

use crate::gateway::ApiGateway;
use crate::token::{Credential, TokenStore};

/// Current authentication state.
///
/// Consumers must not render access-gated content while `Loading`; the
/// route guard turns that into a pending placeholder.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Initial reconstruction (or a login) has not completed yet.
    #[default]
    Loading,
    /// The identity endpoint confirmed the credential.
    Authenticated(UserRecord),
    /// No credential, or the backend rejected it.
    Anonymous,
}

impl SessionState {
    /// The authenticated user's role, if any.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Authenticated(user) => Some(user.role),
            _ => None,
        }
    }

    /// The authenticated user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Whether the initial reconstruction attempt is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Derives and publishes the session state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    gateway: ApiGateway,
    tokens: TokenStore,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Create a manager over the shared credential store. The state starts
    /// as `Loading` until [`initialize`](Self::initialize) runs.
    #[must_use]
    pub fn new(gateway: ApiGateway, tokens: TokenStore) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            inner: Arc::new(SessionInner {
                gateway,
                tokens,
                state,
            }),
        }
    }

    /// Reconstruct the session on activation.
    ///
    /// An absent credential resolves to `Anonymous` without any network
    /// call; a present one is validated against the identity endpoint.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> SessionState {
        if self.inner.tokens.get().is_none() {
            debug!("no credential, session is anonymous");
            return self.transition(SessionState::Anonymous);
        }
        self.transition(SessionState::Loading);
        self.fetch_identity().await
    }

    /// Adopt a freshly issued credential and re-derive the session.
    ///
    /// The caller obtained the credential from a login or register call;
    /// the role still comes from the identity endpoint.
    #[instrument(skip_all)]
    pub async fn login(&self, credential: Credential) -> SessionState {
        self.inner.tokens.set(credential);
        self.transition(SessionState::Loading);
        self.fetch_identity().await
    }

    /// Drop the credential and go anonymous. Every store subscriber
    /// (gateway, cart mirror, other windows) observes the clear.
    pub fn logout(&self) {
        self.inner.tokens.clear();
        self.transition(SessionState::Anonymous);
    }

    /// Current state, re-checked against the credential store.
    ///
    /// A credential cleared elsewhere (a 401, a logout in another window)
    /// makes the next read `Anonymous` even before any watcher runs.
    #[must_use]
    pub fn current(&self) -> SessionState {
        let state = self.inner.state.borrow().clone();
        if self.inner.tokens.get().is_none()
            && matches!(state, SessionState::Authenticated(_))
        {
            return self.transition(SessionState::Anonymous);
        }
        state
    }

    /// Subscribe to session state changes.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    async fn fetch_identity(&self) -> SessionState {
        match self.inner.gateway.get::<UserRecord>("/auth/me").await {
            Ok(user) => {
                debug!(role = %user.role, "identity confirmed");
                self.transition(SessionState::Authenticated(user))
            }
            Err(err) => {
                // Identity failures are absorbed: an anonymous view is
                // always a safe fallback. A 401 has already cleared the
                // credential inside the gateway.
                warn!(error = %err, "identity fetch failed, session is anonymous");
                self.transition(SessionState::Anonymous)
            }
        }
    }

    fn transition(&self, state: SessionState) -> SessionState {
        self.inner.state.send_replace(state.clone());
        state
    }
}
