// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Numeric user identifier, carried as the token subject.
pub type UserId = i64;

/// Claims carried in an access token.
///
/// `sub` is the decimal user id. `userRole` keeps its camelCase name for
/// compatibility with tokens issued by the existing clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID, decimal string)
    pub sub: String,

    /// Account email
    pub email: String,

    /// Role wire name (`USER` or `OWNER`)
    #[serde(rename = "userRole")]
    pub user_role: String,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: u64,

    /// Expiration timestamp
    pub exp: u64,
}

/// Authenticated user information extracted from a verified token.
///
/// This is the request-scoped auth context: the gate inserts it into the
/// request extensions and handlers read it back through the `Auth`
/// extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// User ID (token `sub` claim)
    pub user_id: UserId,

    /// Account email
    pub email: String,

    /// User's role
    pub role: Role,
}

impl AuthenticatedUser {
    /// Whether this identity is the owner of the given user record.
    pub fn is_self(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_use_camel_case_role_name() {
        let claims = TokenClaims {
            sub: "42".to_string(),
            email: "a@b.com".to_string(),
            user_role: "USER".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userRole"], "USER");
        assert_eq!(json["sub"], "42");
        assert!(json.get("user_role").is_none());
    }

    #[test]
    fn is_self_compares_user_id() {
        let user = AuthenticatedUser {
            user_id: 7,
            email: "me@eats.test".to_string(),
            role: Role::User,
        };
        assert!(user.is_self(7));
        assert!(!user.is_self(8));
    }
}
