//! Role-based route guarding.
//!
//! Pure decisions over the current [`SessionState`]: a view router feeds
//! in the requested path and the role the view requires, and acts on the
//! returned [`Access`]. The guard itself performs no navigation and no
//! network calls.

use pomade_core::Role;

use crate::session::SessionState;

/// Login entry point.
pub const LOGIN_PATH: &str = "/login";

/// Home view per role. Fixed table, not inferred.
#[must_use]
pub const fn role_home(role: Role) -> &'static str {
    match role {
        Role::User => "/dashboard",
        Role::Agent => "/agent/dashboard",
        Role::Admin => "/admin/dashboard",
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Render the protected content.
    Grant,
    /// Session is still loading: render a neutral placeholder. Never the
    /// protected content, never a redirect.
    Pending,
    /// Not signed in: go to the login entry point, keeping the requested
    /// location for the post-login return.
    RedirectToLogin {
        /// Originally requested path.
        return_to: String,
    },
    /// Signed in with the wrong role: go to that role's home view.
    RedirectHome {
        /// Target path from the role-home table.
        to: &'static str,
    },
}

/// Decide whether the session may enter a guarded view.
///
/// `required_role` of `None` still requires an authenticated session; it
/// just accepts any role.
#[must_use]
pub fn evaluate(state: &SessionState, required_role: Option<Role>, requested_path: &str) -> Access {
    match state {
        SessionState::Loading => Access::Pending,
        SessionState::Anonymous => Access::RedirectToLogin {
            return_to: requested_path.to_owned(),
        },
        SessionState::Authenticated(user) => match required_role {
            Some(required) if user.role != required => Access::RedirectHome {
                to: role_home(user.role),
            },
            _ => Access::Grant,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pomade_core::{Email, UserId, UserRecord};

    fn user_with_role(role: Role) -> SessionState {
        SessionState::Authenticated(UserRecord {
            id: UserId::new("u-1"),
            name: "Dana".to_string(),
            email: Email::parse("dana@salon.example").unwrap(),
            role,
            phone: None,
            created_at: None,
        })
    }

    #[test]
    fn test_loading_is_always_pending() {
        for required in [None, Some(Role::User), Some(Role::Admin)] {
            assert_eq!(
                evaluate(&SessionState::Loading, required, "/admin/dashboard"),
                Access::Pending
            );
        }
    }

    #[test]
    fn test_anonymous_redirects_to_login_with_return_path() {
        let access = evaluate(&SessionState::Anonymous, Some(Role::User), "/cart");
        assert_eq!(
            access,
            Access::RedirectToLogin {
                return_to: "/cart".to_string()
            }
        );
    }

    #[test]
    fn test_role_mismatch_redirects_to_own_home() {
        // A USER probing an admin view lands on the USER home, never the
        // admin content.
        let access = evaluate(&user_with_role(Role::User), Some(Role::Admin), "/admin/dashboard");
        assert_eq!(access, Access::RedirectHome { to: "/dashboard" });

        let access = evaluate(&user_with_role(Role::Agent), Some(Role::Admin), "/admin/dashboard");
        assert_eq!(access, Access::RedirectHome { to: "/agent/dashboard" });
    }

    #[test]
    fn test_matching_role_renders() {
        let access = evaluate(&user_with_role(Role::Admin), Some(Role::Admin), "/admin/dashboard");
        assert_eq!(access, Access::Grant);
    }

    #[test]
    fn test_no_required_role_accepts_any_authenticated_user() {
        for role in [Role::User, Role::Agent, Role::Admin] {
            assert_eq!(evaluate(&user_with_role(role), None, "/my-orders"), Access::Grant);
        }
    }

    #[test]
    fn test_role_home_table() {
        assert_eq!(role_home(Role::User), "/dashboard");
        assert_eq!(role_home(Role::Agent), "/agent/dashboard");
        assert_eq!(role_home(Role::Admin), "/admin/dashboard");
        assert_eq!(LOGIN_PATH, "/login");
    }
}
