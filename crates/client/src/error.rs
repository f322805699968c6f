//! Error taxonomy for backend interactions.
//!
//! Every failure a caller can observe from this crate is an [`ApiError`].
//! The gateway never swallows errors; the session manager is the only
//! component that absorbs them (an anonymous session is always a safe
//! fallback).

use thiserror::Error;

/// Errors surfaced by the client SDK.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The credential was rejected by the backend. The gateway has already
    /// cleared the token store and signalled a login redirect by the time
    /// this is returned.
    #[error("unauthorized, please sign in again")]
    Unauthorized,

    /// The backend answered with a non-success status. Carries the
    /// backend's own message when the error body was parseable.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Backend-provided or generic message.
        message: String,
    },

    /// The request never produced a response. Not retried automatically;
    /// retrying is a caller concern.
    #[error("network error, please try again: {0}")]
    Network(#[source] reqwest::Error),

    /// A 2xx response body was not valid JSON for the expected type.
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The call was rejected locally before any network traffic.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Local validation failure with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The HTTP status of a backend rejection, if this error carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_texts() {
        let err = ApiError::Http {
            status: 422,
            message: "quantity exceeds stock".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 422: quantity exceeds stock");

        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "unauthorized, please sign in again"
        );

        assert_eq!(
            ApiError::validation("quantity must be at least 1").to_string(),
            "quantity must be at least 1"
        );
    }

    #[test]
    fn test_status_helper() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(
            ApiError::Http {
                status: 404,
                message: String::new()
            }
            .status(),
            Some(404)
        );
        assert_eq!(ApiError::validation("nope").status(), None);
    }
}
