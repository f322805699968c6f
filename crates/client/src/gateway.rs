//! Single choke point for all backend calls.
//!
//! Every outbound request goes through [`ApiGateway`]: it attaches the
//! bearer credential when one is present, speaks JSON in both directions,
//! and normalizes failures into the [`ApiError`] taxonomy.
//!
//! A 401 is a side-effecting error path: the credential is cleared from
//! the shared store and a login redirect is signalled before the error is
//! returned. Transport failures are never retried here.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{error, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::token::TokenStore;

/// Backend error body shape: `{"message": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the marketplace backend.
#[derive(Clone)]
pub struct ApiGateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
    login_redirect: watch::Sender<u64>,
}

impl ApiGateway {
    /// Create a gateway over the given backend and credential store.
    #[must_use]
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Self {
        let base_url = config
            .api_base_url
            .as_str()
            .trim_end_matches('/')
            .to_string();
        let (login_redirect, _) = watch::channel(0);

        Self {
            inner: Arc::new(GatewayInner {
                http: reqwest::Client::new(),
                base_url,
                tokens,
                login_redirect,
            }),
        }
    }

    /// The credential store this gateway reads from.
    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    /// Login redirect signal.
    ///
    /// The counter is bumped each time a 401 forces the user back to the
    /// login entry point; a UI shell observes it and navigates.
    #[must_use]
    pub fn login_redirects(&self) -> watch::Receiver<u64> {
        self.inner.login_redirect.subscribe()
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any non-2xx response or transport failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.builder(Method::GET, path), path).await
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any non-2xx response or transport failure.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.builder(Method::POST, path).json(body), path)
            .await
    }

    /// `PATCH` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any non-2xx response or transport failure.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.builder(Method::PATCH, path).json(body), path)
            .await
    }

    /// `DELETE` a resource, expecting a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any non-2xx response or transport failure.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.builder(Method::DELETE, path), path).await
    }

    /// Build a request with the base URL and, when present, the bearer
    /// credential. The store is consulted per request; the credential may
    /// have been cleared by a concurrent 401.
    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.inner.base_url);
        let mut request = self.inner.http.request(method, url);
        if let Some(credential) = self.inner.tokens.get() {
            request = request.bearer_auth(credential.token());
        }
        request
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(path, error = %e, "request failed without a response");
            ApiError::Network(e)
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(path, "credential rejected, clearing and redirecting to login");
            self.inner.tokens.clear();
            self.inner.login_redirect.send_modify(|n| *n += 1);
            return Err(ApiError::Unauthorized);
        }

        // Read the body as text first for better error diagnostics
        let text = response.text().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or_else(|_| format!("HTTP error: {}", status.as_u16()));
            warn!(path, status = status.as_u16(), reason = %message, "backend rejected request");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(
                path,
                error = %e,
                body = %text.chars().take(200).collect::<String>(),
                "failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }
}
