// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! The persistent user record and the request/response structures used by
//! the REST API. Wire types derive `Serialize`/`Deserialize` and `ToSchema`
//! for JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **User record**: [`User`], the stored account, never serialized to clients
//! - **Projections**: [`UserResponse`], the client-facing view (no password)
//! - **Requests**: sign-up, sign-in and profile patch bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{Role, UserId};

// =============================================================================
// User Record
// =============================================================================

/// Delivery address. Location and street address are only ever stored
/// together.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Address {
    /// Area or city (e.g. "Seoul").
    pub location: String,
    /// Street address within the location.
    pub address: String,
}

/// A stored user account.
///
/// Accounts are soft-deleted: once `is_deleted` is set the record is kept
/// but every further lifecycle operation on it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub nickname: String,
    /// argon2 PHC string
    pub password_hash: String,
    pub role: Role,
    pub is_deleted: bool,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Fields needed to create a user record; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub nickname: String,
    pub password_hash: String,
    pub role: Role,
}

// =============================================================================
// Projections
// =============================================================================

/// Client-facing view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    /// Numeric user ID.
    pub id: UserId,
    /// Account email.
    pub email: String,
    /// Display name.
    pub nickname: String,
    /// Account role.
    pub role: Role,
    /// Delivery location, if an address is on file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Delivery street address, if an address is on file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub modified_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let (location, address) = match &user.address {
            Some(addr) => (Some(addr.location.clone()), Some(addr.address.clone())),
            None => (None, None),
        };

        Self {
            id: user.id,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            role: user.role,
            location,
            address,
            created_at: user.created_at,
            modified_at: user.modified_at,
        }
    }
}

/// Response after deleting an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    /// The ID of the deleted account.
    pub id: UserId,
    /// Message indicating success.
    pub message: String,
}

// =============================================================================
// Requests
// =============================================================================

/// Partial profile update. Absent fields are left unchanged.
///
/// `location` and `address` must be supplied together or not at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserPatchRequest {
    /// New display name.
    #[serde(default)]
    pub nickname: Option<String>,
    /// New delivery location (requires `address`).
    #[serde(default)]
    pub location: Option<String>,
    /// New delivery street address (requires `location`).
    #[serde(default)]
    pub address: Option<String>,
}

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Account email (unique).
    pub email: String,
    /// Plain-text password; hashed before storage.
    pub password: String,
    /// Display name.
    pub nickname: String,
    /// Account role.
    pub role: Role,
}

/// Request to sign in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SigninRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Issued access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT, to be sent as `Authorization: Bearer <access_token>`.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// The authenticated account.
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(address: Option<Address>) -> User {
        let now = Utc::now();
        User {
            id: 1,
            email: "eater@eats.test".to_string(),
            nickname: "peanut".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::User,
            is_deleted: false,
            address,
            created_at: now,
            modified_at: now,
        }
    }

    #[test]
    fn projection_excludes_password() {
        let response = UserResponse::from(&sample_user(None));
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "eater@eats.test");
        assert_eq!(json["role"], "USER");
    }

    #[test]
    fn projection_flattens_address_pair() {
        let response = UserResponse::from(&sample_user(Some(Address {
            location: "Seoul".to_string(),
            address: "Gangnam-daero 1".to_string(),
        })));

        assert_eq!(response.location.as_deref(), Some("Seoul"));
        assert_eq!(response.address.as_deref(), Some("Gangnam-daero 1"));
    }

    #[test]
    fn projection_omits_absent_address() {
        let json = serde_json::to_value(UserResponse::from(&sample_user(None))).unwrap();
        assert!(json.get("location").is_none());
        assert!(json.get("address").is_none());
    }

    #[test]
    fn patch_request_fields_default_to_absent() {
        let patch: UserPatchRequest = serde_json::from_str(r#"{"nickname":"ddangkong"}"#).unwrap();
        assert_eq!(patch.nickname.as_deref(), Some("ddangkong"));
        assert!(patch.location.is_none());
        assert!(patch.address.is_none());
    }
}
