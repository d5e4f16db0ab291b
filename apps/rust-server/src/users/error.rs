// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Lifecycle errors.

use crate::auth::UserId;
use crate::store::StoreError;

/// Message for operations on a soft-deleted account.
pub const DELETED_USER: &str = "deleted user";

/// Message for operations on another user's account.
pub const NO_PERMISSION: &str = "no permission";

/// Message for a half-supplied address pair.
pub const ADDRESS_PAIR_REQUIRED: &str = "location and address must both be supplied";

/// User lifecycle failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// No record with this id
    #[error("user {0} not found")]
    NotFound(UserId),

    /// Record exists but is in a state that forbids the operation
    #[error("{0}")]
    InvalidState(&'static str),

    /// Caller is not allowed to touch this record
    #[error("{0}")]
    Forbidden(&'static str),

    /// Request content is invalid
    #[error("{0}")]
    InvalidArgument(String),

    /// Unique field already taken
    #[error("{0}")]
    Conflict(String),

    /// Email/password pair does not match an account
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password hashing or verification could not run
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// Backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
