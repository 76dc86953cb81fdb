//! User record and role set.
//!
//! # Invariants
//! - `login` is unique across users (enforced by storage).
//! - `roles` is a set; order and duplicates carry no meaning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Storage-assigned user identifier.
pub type UserId = i64;

/// Access role attached to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Manager,
    Client,
}

impl Role {
    /// Stable string id used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Manager => "manager",
            Self::Client => "client",
        }
    }

    /// Parses a stored role id.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "administrator" => Some(Self::Administrator),
            "manager" => Some(Self::Manager),
            "client" => Some(Self::Client),
            _ => None,
        }
    }
}

/// Shop account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Option<UserId>,
    pub login: String,
    pub password: String,
    pub name: String,
    pub age: i32,
    pub city: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
}

impl User {
    /// Creates an unsaved user without roles.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        age: i32,
        city: impl Into<String>,
    ) -> Self {
        Self {
            user_id: None,
            login: login.into(),
            password: password.into(),
            name: name.into(),
            age,
            city: city.into(),
            roles: BTreeSet::new(),
        }
    }

    /// Returns the same user bound to an existing id.
    pub fn with_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Returns the same user with `role` added.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn role_ids_parse_back() {
        for role in [Role::Administrator, Role::Manager, Role::Client] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Administrator"), None);
    }
}
