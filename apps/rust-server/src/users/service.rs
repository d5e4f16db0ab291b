// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User lifecycle service.
//!
//! The service wraps a handle to a [`UserStore`]: a shared reference or read
//! guard for lookups, a mutable reference or write guard for mutations.
//! Holding a write guard for the service's lifetime makes each
//! read-modify-write atomic, and a record is only saved once every
//! precondition has passed, so a failed call persists nothing. Password
//! hashing lives in [`super::credentials`] and never runs under a guard.
//!
//! ## Check order
//!
//! | Operation | Checks, in order |
//! |-----------|------------------|
//! | `get_user` | exists → not deleted |
//! | `update_user` | exists → caller owns → not deleted → address pair |
//! | `delete_user` | exists → caller owns → not deleted |

use std::ops::{Deref, DerefMut};

use chrono::Utc;

use crate::auth::{AuthenticatedUser, UserId};
use crate::models::{Address, NewUser, User, UserPatchRequest, UserResponse};
use crate::store::{StoreError, UserStore};

use super::error::{DomainError, ADDRESS_PAIR_REQUIRED, DELETED_USER};
use super::ownership::OwnershipEnforcer;

/// User lifecycle operations over a store handle `G`.
pub struct UserService<G> {
    store: G,
}

impl<G> UserService<G>
where
    G: Deref,
    G::Target: UserStore,
{
    /// Create a service over a store handle.
    pub fn new(store: G) -> Self {
        Self { store }
    }

    /// Load a record, failing with `NotFound` when absent.
    fn load(&self, id: UserId) -> Result<User, DomainError> {
        self.store.find_by_id(id)?.ok_or(DomainError::NotFound(id))
    }

    /// Get an active user's public projection.
    pub fn get_user(&self, id: UserId) -> Result<UserResponse, DomainError> {
        let user = self.load(id)?;
        ensure_active(&user)?;
        Ok(UserResponse::from(&user))
    }

    /// Fail with `Conflict` when `email` already belongs to an account.
    pub fn ensure_email_available(&self, email: &str) -> Result<(), DomainError> {
        match self.store.find_by_email(email)? {
            Some(_) => Err(email_taken()),
            None => Ok(()),
        }
    }

    /// Look up the account a sign-in attempt names.
    ///
    /// An unknown email is `InvalidCredentials`, indistinguishable from a
    /// wrong password. The password itself is checked after the store guard
    /// is released.
    pub fn account_for_signin(&self, email: &str) -> Result<User, DomainError> {
        self.store
            .find_by_email(email)?
            .ok_or(DomainError::InvalidCredentials)
    }
}

impl<G> UserService<G>
where
    G: DerefMut,
    G::Target: UserStore,
{
    /// Insert an already validated and hashed account.
    pub fn register(&mut self, new_user: NewUser) -> Result<User, DomainError> {
        self.ensure_email_available(&new_user.email)?;

        self.store.insert(new_user).map_err(|e| match e {
            StoreError::DuplicateEmail(_) => email_taken(),
            other => DomainError::Store(other),
        })
    }

    /// Apply a partial profile update to the caller's own account.
    pub fn update_user(
        &mut self,
        auth: &AuthenticatedUser,
        id: UserId,
        patch: UserPatchRequest,
    ) -> Result<UserResponse, DomainError> {
        let mut user = self.load(id)?;
        user.verify_ownership(auth)?;
        ensure_active(&user)?;

        let address = match (patch.location, patch.address) {
            (Some(location), Some(address)) => Some(Address { location, address }),
            (None, None) => None,
            _ => {
                return Err(DomainError::InvalidArgument(
                    ADDRESS_PAIR_REQUIRED.to_string(),
                ))
            }
        };

        if let Some(nickname) = patch.nickname {
            user.nickname = nickname;
        }
        if let Some(address) = address {
            user.address = Some(address);
        }
        user.modified_at = Utc::now();

        self.store.save(&user)?;
        Ok(UserResponse::from(&user))
    }

    /// Soft-delete the caller's own account and return its id.
    pub fn delete_user(
        &mut self,
        id: UserId,
        auth: &AuthenticatedUser,
    ) -> Result<UserId, DomainError> {
        let mut user = self.load(id)?;
        user.verify_ownership(auth)?;
        ensure_active(&user)?;

        user.is_deleted = true;
        user.modified_at = Utc::now();

        self.store.save(&user)?;
        Ok(user.id)
    }
}

pub(super) fn ensure_active(user: &User) -> Result<(), DomainError> {
    if user.is_deleted {
        Err(DomainError::InvalidState(DELETED_USER))
    } else {
        Ok(())
    }
}

fn email_taken() -> DomainError {
    DomainError::Conflict("email already registered".to_string())
}
