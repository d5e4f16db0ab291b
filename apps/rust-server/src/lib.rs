// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Eats Server - Food Ordering Backend
//!
//! This crate provides the authentication gate and user account lifecycle of
//! the Eats food-ordering API.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - JWT verification, route classification and the request gate
//! - `config` - Environment configuration
//! - `store` - User record storage
//! - `users` - User lifecycle rules (lookup, update, soft delete)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod users;
