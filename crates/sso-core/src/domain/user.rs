//! User domain entity

use std::fmt;

use serde::{Deserialize, Serialize};
use sso_shared::UserRole;
use uuid::Uuid;

/// A stored user as the persistence layer hands it over. Read-only here.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
}

/// Login input. The password only lives for the duration of one request.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// User info returned in auth responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&UserRecord> for UserInfo {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("a@b.com", "Pw@1");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("a@b.com"));
        assert!(!printed.contains("Pw@1"));
    }

    #[test]
    fn test_user_info_drops_hash() {
        let record = UserRecord {
            id: Uuid::new_v4(),
            display_name: "john smith".into(),
            email: "jsmith@gmail.com".into(),
            role: UserRole::Standard,
            password_hash: "$2b$04$abc".into(),
        };
        let info = UserInfo::from(&record);
        assert_eq!(info.id, record.id);
        assert_eq!(info.email, record.email);
    }
}
