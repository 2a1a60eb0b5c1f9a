//! Current user and role model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Viewer,
}

/// The person operating the contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl UserRole {
    pub fn can_modify(self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn toggled(self) -> Self {
        match self {
            UserRole::Admin => UserRole::Viewer,
            UserRole::Viewer => UserRole::Admin,
        }
    }
}

impl User {
    pub fn can_modify(&self) -> bool {
        self.role.can_modify()
    }

    pub fn with_role(&self, role: UserRole) -> Self {
        Self {
            role,
            ..self.clone()
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            name: "Admin User".to_string(),
            role: UserRole::Admin,
        }
    }
}
