// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # User Lifecycle
//!
//! Account state machine behind the auth gate.
//!
//! ```text
//!   register ──► ACTIVE ──delete_user──► DELETED (terminal)
//!                  │  ▲
//!                  └──┘ update_user (self only)
//! ```
//!
//! A deleted account is kept (soft delete) but every further read, update,
//! delete or sign-in on it fails with [`DomainError::InvalidState`].

pub mod credentials;
pub mod error;
pub mod ownership;
pub mod service;

pub use error::DomainError;
pub use ownership::{OwnedResource, OwnershipEnforcer};
pub use service::UserService;
