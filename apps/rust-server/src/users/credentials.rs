// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sign-up validation and password work.
//!
//! argon2 is CPU-bound, so hashing and verification run on the blocking
//! pool and never while a store guard is held. Handlers validate, hash, and
//! only then lock the store for the insert; sign-in clones the account under
//! the read guard and verifies after releasing it.

use tokio::task;

use crate::auth::password;
use crate::models::{NewUser, SignupRequest, User};

use super::error::DomainError;
use super::service::ensure_active;

/// Check sign-up input before any store or hashing work.
pub fn validate_signup(request: &SignupRequest) -> Result<(), DomainError> {
    if !request.email.contains('@') {
        return Err(DomainError::InvalidArgument(
            "email must be a valid address".to_string(),
        ));
    }
    if request.password.is_empty() {
        return Err(DomainError::InvalidArgument(
            "password must not be empty".to_string(),
        ));
    }
    if request.nickname.trim().is_empty() {
        return Err(DomainError::InvalidArgument(
            "nickname must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Hash the sign-up password on the blocking pool and build the record to
/// insert.
pub async fn hash_signup(request: SignupRequest) -> Result<NewUser, DomainError> {
    let SignupRequest {
        email,
        password: plain,
        nickname,
        role,
    } = request;

    let password_hash = task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| DomainError::PasswordHash(e.to_string()))?
        .map_err(|e| DomainError::PasswordHash(e.to_string()))?;

    Ok(NewUser {
        email,
        nickname,
        password_hash,
        role,
    })
}

/// Verify a sign-in password against an account looked up beforehand.
///
/// A wrong password is `InvalidCredentials`; a correct password on a
/// deleted account is `InvalidState`.
pub async fn check_password(user: User, attempt: String) -> Result<User, DomainError> {
    let hash = user.password_hash.clone();
    let matches = task::spawn_blocking(move || password::verify_password(&hash, &attempt))
        .await
        .map_err(|e| DomainError::PasswordHash(e.to_string()))?;

    if !matches {
        return Err(DomainError::InvalidCredentials);
    }
    ensure_active(&user)?;
    Ok(user)
}
