// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request gate middleware for Axum.
//!
//! Every inbound request passes through [`auth_gate`] before any handler
//! runs. The middleware is a thin shell around [`authorize`], a pure
//! decision function that takes the route class, the `Authorization` header
//! and a verifier and returns either the identity to attach or the error
//! response to send.
//!
//! ## Decision steps
//!
//! 1. `Public` routes are forwarded untouched; no header is read
//! 2. A `Bearer <token>` header is required (`400 token required`)
//! 3. The token is verified; failures map through [`AuthError`]
//! 4. The verified role must match the route class (`401 no permission`)
//! 5. The identity is inserted into the request extensions and the request
//!    is forwarded
//!
//! ## Usage
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/users/me", get(users::get_current_user))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), auth_gate))
//!     .with_state(state);
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::jwt::{strip_bearer, VerifyToken};
use super::routes::{classify, RouteClass};
use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Decide whether a request of class `class` may proceed.
///
/// Returns `Ok(None)` for public routes, `Ok(Some(user))` for authenticated
/// requests whose role matches the class, and the rejection otherwise. The
/// verifier is only consulted once a well-formed bearer header is present.
pub fn authorize<V: VerifyToken + ?Sized>(
    class: RouteClass,
    authorization: Option<&HeaderValue>,
    verifier: &V,
) -> Result<Option<AuthenticatedUser>, AuthError> {
    if class == RouteClass::Public {
        return Ok(None);
    }

    let token = authorization
        .and_then(|value| value.to_str().ok())
        .and_then(strip_bearer)
        .ok_or(AuthError::TokenRequired)?;

    let user = verifier.verify(token)?;

    if !class.admits(user.role) {
        return Err(AuthError::NoPermission);
    }

    Ok(Some(user))
}

/// Authentication gate middleware.
pub async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let class = classify(request.method(), request.uri().path());

    let decision = authorize(
        class,
        request.headers().get(AUTHORIZATION),
        &state.auth_config.verifier,
    );

    match decision {
        Ok(Some(user)) => {
            tracing::debug!(
                user_id = user.user_id,
                role = %user.role,
                path = %request.uri().path(),
                "Request authenticated"
            );
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => next.run(request).await,
        Err(err) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                error_code = err.error_code(),
                detail = ?err,
                "Request rejected by auth gate"
            );
            err.into_response()
        }
    }
}
