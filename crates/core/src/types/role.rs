//! Account roles.

use serde::{Deserialize, Serialize};

/// Marketplace account role.
///
/// Determines which views and API surfaces an account may reach. The role
/// is asserted by the backend's identity endpoint; it is never chosen by
/// the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Salon buyer with cart and order access.
    #[default]
    User,
    /// Sales agent earning commissions on attributed orders.
    Agent,
    /// Back-office administrator with full resource access.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "USER"),
            Self::Agent => write!(f, "AGENT"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "AGENT" => Ok(Self::Agent),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form_is_screaming_case() {
        assert_eq!(serde_json::to_string(&Role::Agent).unwrap(), "\"AGENT\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for role in [Role::User, Role::Agent, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("viewer".parse::<Role>().is_err());
    }
}
