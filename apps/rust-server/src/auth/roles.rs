// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// The two roles carry disjoint capability sets. There is no hierarchy:
/// an `Owner` cannot use customer routes and a `User` cannot use
/// restaurant-management routes.
///
/// - `User` - Customer account (orders, reviews, own profile)
/// - `Owner` - Restaurant owner (menu, order status, restaurant orders)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Customer account
    User,
    /// Restaurant owner account
    Owner,
}

impl Role {
    /// Parse role from its wire form.
    ///
    /// Matching is exact: `"USER"` and `"OWNER"` only. Tokens carrying any
    /// other spelling are treated as malformed.
    pub fn from_str(s: &str) -> Option<Role> {
        match s {
            "USER" => Some(Role::User),
            "OWNER" => Some(Role::Owner),
            _ => None,
        }
    }

    /// Wire form of the role, as carried in the `userRole` claim.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Owner => "OWNER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_parses_exact_wire_names() {
        assert_eq!(Role::from_str("USER"), Some(Role::User));
        assert_eq!(Role::from_str("OWNER"), Some(Role::Owner));
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert_eq!(Role::from_str("user"), None);
        assert_eq!(Role::from_str("Owner"), None);
        assert_eq!(Role::from_str("ADMIN"), None);
        assert_eq!(Role::from_str(""), None);
    }

    #[test]
    fn serde_uses_uppercase_names() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), r#""OWNER""#);
        let role: Role = serde_json::from_str(r#""USER""#).unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(Role::User.to_string(), "USER");
        assert_eq!(Role::Owner.to_string(), "OWNER");
    }
}
