//! Route guard resolution.
//!
//! Resolves a view path against the current session the way the view
//! router does and reports the decision.

use clap::Args;

use pomade_client::guard::{self, Access};
use pomade_core::Role;

use super::CommandResult;
use crate::App;

#[derive(Args)]
pub struct OpenArgs {
    /// View path, e.g. /admin/dashboard
    pub path: String,
}

/// Role requirement per view prefix. `None` entries are guarded views any
/// signed-in account may enter.
fn required_role(path: &str) -> Option<Role> {
    if path.starts_with("/admin") {
        Some(Role::Admin)
    } else if path.starts_with("/agent") {
        Some(Role::Agent)
    } else if path == "/dashboard" {
        Some(Role::User)
    } else {
        None
    }
}

pub async fn run(app: &App, args: OpenArgs) -> CommandResult {
    let state = app.session.initialize().await;
    match guard::evaluate(&state, required_role(&args.path), &args.path) {
        Access::Grant => println!("{}: granted", args.path),
        Access::Pending => println!("{}: session loading, showing placeholder", args.path),
        Access::RedirectToLogin { return_to } => {
            println!(
                "{}: redirect to {} (return to {return_to} after login)",
                args.path,
                guard::LOGIN_PATH
            );
        }
        Access::RedirectHome { to } => {
            println!("{}: redirect to {to}", args.path);
        }
    }
    Ok(())
}
