// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{JwtIssuer, JwtVerifier};
use crate::store::InMemoryUserStore;

/// Token verification and issuance, sharing one HS256 secret.
pub struct AuthConfig {
    pub verifier: JwtVerifier,
    pub issuer: JwtIssuer,
}

impl AuthConfig {
    pub fn new(secret: &[u8], ttl_secs: u64, leeway_secs: u64) -> Self {
        Self {
            verifier: JwtVerifier::new(secret, leeway_secs),
            issuer: JwtIssuer::new(secret, ttl_secs),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryUserStore>>,
    pub auth_config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(store: InMemoryUserStore, auth_config: AuthConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth_config: Arc::new(auth_config),
        }
    }
}
