//! Staff account domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bakehouse_core::{StaffRole, UserId};

/// A staff account.
///
/// The password hash deliberately never leaves the repository layer, so
/// serializing a `User` can never leak it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_user_has_no_password_fields() {
        let user = User {
            id: UserId::new(1),
            username: "counter".to_owned(),
            role: StaffRole::Admin,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).expect("serialize");
        assert!(json.contains("\"username\":\"counter\""));
        assert!(json.contains("\"role\":\"admin\""));
        assert!(!json.to_lowercase().contains("password"));
        assert!(!json.to_lowercase().contains("hash"));
    }
}
