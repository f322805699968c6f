//! Authentication endpoints.

use serde::Serialize;

use pomade_core::{AuthResponse, Email, NewUser, UserRecord};

use crate::error::ApiError;
use crate::gateway::ApiGateway;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a Email,
    password: &'a str,
}

/// `POST /auth/*` and the identity endpoint.
///
/// These wrappers do not touch the token store: adopting a returned token
/// is the session manager's job, so tests and callers can inspect the
/// response first.
#[derive(Clone)]
pub struct AuthApi {
    gateway: ApiGateway,
}

impl AuthApi {
    #[must_use]
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Register a new account. The response carries a token and the
    /// created account record.
    ///
    /// # Errors
    ///
    /// `ApiError::Http` with the backend's message on validation failures
    /// (e.g. an already-registered email).
    pub async fn register(&self, new_user: &NewUser) -> Result<AuthResponse, ApiError> {
        self.gateway.post("/auth/register", new_user).await
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// `ApiError::Http` on rejected credentials.
    pub async fn login(&self, email: &Email, password: &str) -> Result<AuthResponse, ApiError> {
        self.gateway
            .post("/auth/login", &LoginRequest { email, password })
            .await
    }

    /// Fetch the current account record. Requires a credential; the
    /// response is the only trusted source for the account's role.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` when the credential is missing or stale.
    pub async fn me(&self) -> Result<UserRecord, ApiError> {
        self.gateway.get("/auth/me").await
    }
}
