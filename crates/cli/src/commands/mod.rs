//! CLI command implementations.

pub mod agents;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod open;
pub mod orders;
pub mod purchase;

use pomade_client::error::ApiError;
use pomade_client::guard::{self, Access};
use pomade_client::session::SessionState;

use crate::App;

/// Result type for all commands.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Initialize the session and require an authenticated user, the way a
/// guarded view would: anonymous callers are told where to sign in.
pub async fn require_session(app: &App, requested_path: &str) -> Result<SessionState, ApiError> {
    let state = app.session.initialize().await;
    match guard::evaluate(&state, None, requested_path) {
        Access::Grant => Ok(state),
        Access::RedirectToLogin { return_to } => Err(ApiError::Validation(format!(
            "sign in first: `pomade login` (then retry {return_to})"
        ))),
        // One-shot initialization always resolves; Pending and role
        // redirects cannot come out of a no-role requirement.
        _ => Err(ApiError::validation("session unavailable")),
    }
}
