// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User record store.
//!
//! [`UserStore`] is the seam to whatever persists accounts; the lifecycle
//! service only ever talks to the trait. [`InMemoryUserStore`] backs the
//! server and the tests.
//!
//! Records are never removed: soft delete is a flag on [`User`], and a
//! deleted account keeps its email reserved.

use std::collections::BTreeMap;

use crate::auth::UserId;
use crate::models::{NewUser, User};

/// Error type for user store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Email already belongs to a stored record
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// `save` was called for an id the store has never assigned
    #[error("no stored user with id {0}")]
    MissingRecord(UserId),

    /// Backend failure
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for user records.
pub trait UserStore {
    /// Look up a record by id, deleted or not.
    fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Look up a record by exact email, deleted or not.
    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Create a record, assigning the next id.
    fn insert(&mut self, new_user: NewUser) -> StoreResult<User>;

    /// Overwrite an existing record.
    fn save(&mut self, user: &User) -> StoreResult<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: BTreeMap<UserId, User>,
    last_id: UserId,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users.values().find(|user| user.email == email).cloned())
    }

    fn insert(&mut self, new_user: NewUser) -> StoreResult<User> {
        if self.users.values().any(|user| user.email == new_user.email) {
            return Err(StoreError::DuplicateEmail(new_user.email));
        }

        self.last_id += 1;
        let now = chrono::Utc::now();
        let user = User {
            id: self.last_id,
            email: new_user.email,
            nickname: new_user.nickname,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_deleted: false,
            address: None,
            created_at: now,
            modified_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn save(&mut self, user: &User) -> StoreResult<()> {
        match self.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(StoreError::MissingRecord(user.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            nickname: "nick".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut store = InMemoryUserStore::new();
        let first = store.insert(new_user("a@eats.test")).unwrap();
        let second = store.insert(new_user("b@eats.test")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.is_deleted);
        assert!(first.address.is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn insert_rejects_duplicate_email() {
        let mut store = InMemoryUserStore::new();
        store.insert(new_user("a@eats.test")).unwrap();

        let err = store.insert(new_user("a@eats.test")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail("a@eats.test".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn find_by_id_and_email() {
        let mut store = InMemoryUserStore::new();
        let user = store.insert(new_user("a@eats.test")).unwrap();

        assert_eq!(store.find_by_id(user.id).unwrap(), Some(user.clone()));
        assert_eq!(store.find_by_email("a@eats.test").unwrap(), Some(user));
        assert_eq!(store.find_by_id(99).unwrap(), None);
        assert_eq!(store.find_by_email("A@eats.test").unwrap(), None);
    }

    #[test]
    fn save_overwrites_existing_record() {
        let mut store = InMemoryUserStore::new();
        let mut user = store.insert(new_user("a@eats.test")).unwrap();
        user.is_deleted = true;
        store.save(&user).unwrap();

        assert!(store.find_by_id(user.id).unwrap().unwrap().is_deleted);
    }

    #[test]
    fn save_unknown_record_errors() {
        let mut store = InMemoryUserStore::new();
        let mut user = store.insert(new_user("a@eats.test")).unwrap();
        user.id = 77;

        assert_eq!(store.save(&user), Err(StoreError::MissingRecord(77)));
    }
}
