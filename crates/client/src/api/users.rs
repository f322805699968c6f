//! User and agent endpoints.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use pomade_core::{AuthResponse, NewUser, Role, UserId, UserRecord};

use crate::error::ApiError;
use crate::gateway::ApiGateway;

use super::with_query;

const AGENTS_CACHE_KEY: &str = "agents";

/// `GET /users[...]` plus the public agent listing.
#[derive(Clone)]
pub struct UserApi {
    inner: Arc<UserApiInner>,
}

struct UserApiInner {
    gateway: ApiGateway,
    agents: Cache<&'static str, Vec<UserRecord>>,
}

impl UserApi {
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        let agents = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();
        Self {
            inner: Arc::new(UserApiInner { gateway, agents }),
        }
    }

    /// List accounts (admin), optionally filtered by role.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn list(&self, role: Option<Role>) -> Result<Vec<UserRecord>, ApiError> {
        let path = with_query("/users", &[("role", role.map(|r| r.to_string()))]);
        self.inner.gateway.get(&path).await
    }

    /// Get a single account.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the account does not exist or the
    /// request fails.
    pub async fn get(&self, id: &UserId) -> Result<UserRecord, ApiError> {
        self.inner.gateway.get(&format!("/users/{id}")).await
    }

    /// Public listing of active agents, for checkout attribution. Cached
    /// for five minutes; no credential required.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn agents(&self) -> Result<Vec<UserRecord>, ApiError> {
        if let Some(agents) = self.inner.agents.get(AGENTS_CACHE_KEY).await {
            debug!("cache hit for agent listing");
            return Ok(agents);
        }

        let agents: Vec<UserRecord> = self.inner.gateway.get("/users/agents").await?;
        self.inner
            .agents
            .insert(AGENTS_CACHE_KEY, agents.clone())
            .await;
        Ok(agents)
    }

    /// Create an account on behalf of someone else (admin-initiated).
    ///
    /// Goes through the register endpoint but deliberately does not adopt
    /// the returned token: the operator stays signed in as themselves.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn create(&self, new_user: &NewUser) -> Result<UserRecord, ApiError> {
        let response: AuthResponse = self.inner.gateway.post("/auth/register", new_user).await?;
        Ok(response.user)
    }
}
