//! Staff roles and the privilege ordering between them.

use serde::{Deserialize, Serialize};

/// Role held by a staff account.
///
/// The derived ordering encodes the privilege hierarchy: `Admin` sorts
/// below `SuperAdmin`. All authorization decisions go through
/// [`StaffRole::permits`] rather than ad-hoc comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    /// Manages the catalog and works orders.
    #[serde(rename = "admin")]
    Admin,
    /// Everything `Admin` can do, plus staff account management.
    #[serde(rename = "super-admin")]
    SuperAdmin,
}

impl StaffRole {
    /// Whether this role satisfies an operation's required privilege tier.
    #[must_use]
    pub fn permits(self, required: Self) -> bool {
        self >= required
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::SuperAdmin => write!(f, "super-admin"),
        }
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "super-admin" => Ok(Self::SuperAdmin),
            _ => Err(format!("invalid staff role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_outranks_admin() {
        assert!(StaffRole::Admin < StaffRole::SuperAdmin);
        assert!(StaffRole::SuperAdmin.permits(StaffRole::Admin));
        assert!(StaffRole::SuperAdmin.permits(StaffRole::SuperAdmin));
        assert!(StaffRole::Admin.permits(StaffRole::Admin));
        assert!(!StaffRole::Admin.permits(StaffRole::SuperAdmin));
    }

    #[test]
    fn roles_use_hyphenated_wire_names() {
        assert_eq!(
            serde_json::to_string(&StaffRole::SuperAdmin).expect("serialize"),
            "\"super-admin\""
        );
        let role: StaffRole = serde_json::from_str("\"admin\"").expect("deserialize");
        assert_eq!(role, StaffRole::Admin);
    }

    #[test]
    fn unknown_roles_are_rejected() {
        assert!("viewer".parse::<StaffRole>().is_err());
        assert!("".parse::<StaffRole>().is_err());
        assert!(serde_json::from_str::<StaffRole>("\"root\"").is_err());
    }

    #[test]
    fn parse_round_trips_display() {
        for role in [StaffRole::Admin, StaffRole::SuperAdmin] {
            assert_eq!(role.to_string().parse::<StaffRole>(), Ok(role));
        }
    }
}
