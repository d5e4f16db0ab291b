// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for self-service operations.
//!
//! Account mutation is self-service only: the caller's token subject must be
//! the record's owner. There is no admin override.

use crate::auth::{AuthenticatedUser, UserId};
use crate::models::User;

use super::error::{DomainError, NO_PERMISSION};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_user_id(&self) -> UserId;
}

/// Trait for enforcing ownership before mutation.
pub trait OwnershipEnforcer {
    /// Verify that the user owns this resource.
    ///
    /// # Errors
    /// Returns `DomainError::Forbidden` if the user doesn't own the resource.
    fn verify_ownership(&self, user: &AuthenticatedUser) -> Result<(), DomainError>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, user: &AuthenticatedUser) -> Result<(), DomainError> {
        if user.is_self(self.owner_user_id()) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(NO_PERMISSION))
        }
    }
}

/// An account is owned by itself.
impl OwnedResource for User {
    fn owner_user_id(&self) -> UserId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    struct TestResource {
        owner: UserId,
    }

    impl OwnedResource for TestResource {
        fn owner_user_id(&self) -> UserId {
            self.owner
        }
    }

    fn make_user(user_id: UserId, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id,
            email: format!("user{user_id}@eats.test"),
            role,
        }
    }

    #[test]
    fn ownership_verification_passes_for_owner() {
        let resource = TestResource { owner: 1 };
        assert!(resource.verify_ownership(&make_user(1, Role::User)).is_ok());
    }

    #[test]
    fn ownership_verification_fails_for_non_owner() {
        let resource = TestResource { owner: 1 };
        let result = resource.verify_ownership(&make_user(2, Role::User));
        assert_eq!(result, Err(DomainError::Forbidden(NO_PERMISSION)));
    }

    #[test]
    fn owner_role_grants_no_override() {
        let resource = TestResource { owner: 1 };
        let result = resource.verify_ownership(&make_user(2, Role::Owner));
        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }
}
