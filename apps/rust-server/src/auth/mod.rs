// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! JWT authentication and role-based route gating for the Eats API.
//!
//! ## Auth Flow
//!
//! 1. Client signs in at `/api/auth/signin` and receives an HS256 token
//! 2. Client sends `Authorization: Bearer <token>` on every other request
//! 3. The gate:
//!    - Classifies the route from method + path (`routes`)
//!    - Verifies signature and expiry (`jwt`)
//!    - Extracts:
//!      - `sub` → numeric `user_id`
//!      - `email`
//!      - `userRole` → [`Role`]
//!    - Checks the role against the route class
//! 4. Handlers read the identity with the [`Auth`] extractor
//!
//! ## Security
//!
//! - Only the sign-in and sign-up endpoints are reachable without a token
//! - Unexpected verification failures fail closed (401)
//! - Nothing is cached between requests

pub mod claims;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod roles;
pub mod routes;

pub use claims::{AuthenticatedUser, UserId};
pub use error::AuthError;
pub use extractor::Auth;
pub use gate::auth_gate;
pub use jwt::{JwtIssuer, JwtVerifier, VerifyError, VerifyToken};
pub use roles::Role;
pub use routes::{classify, RouteClass};
