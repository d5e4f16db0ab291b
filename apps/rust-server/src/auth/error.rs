// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::jwt::VerifyError;

/// Request gate error type.
///
/// Status codes are deliberately asymmetric: structurally unsupported or
/// malformed tokens are client errors (400) while signature, expiry and
/// permission failures are 401. Existing clients depend on these pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization header missing or not a bearer token
    TokenRequired,
    /// Token signature is invalid or token is structurally broken
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// Token algorithm or header is not supported
    UnsupportedToken,
    /// Token claims are missing or unparsable
    MalformedToken,
    /// Unexpected verification failure
    VerificationError(String),
    /// Role does not match the route classification
    NoPermission,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::TokenRequired => "token_required",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::UnsupportedToken => "unsupported_token",
            AuthError::MalformedToken => "malformed_token",
            AuthError::VerificationError(_) => "verification_error",
            AuthError::NoPermission => "no_permission",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::TokenRequired | AuthError::UnsupportedToken | AuthError::MalformedToken => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::VerificationError(_)
            | AuthError::NoPermission => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<VerifyError> for AuthError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::InvalidSignature => AuthError::InvalidSignature,
            VerifyError::Expired => AuthError::TokenExpired,
            VerifyError::UnsupportedFormat => AuthError::UnsupportedToken,
            VerifyError::MalformedClaims(_) => AuthError::MalformedToken,
            VerifyError::Other(msg) => AuthError::VerificationError(msg),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Detail of VerificationError stays in the logs, not the response
        match self {
            AuthError::TokenRequired => write!(f, "token required"),
            AuthError::InvalidSignature => write!(f, "invalid signature"),
            AuthError::TokenExpired => write!(f, "expired token"),
            AuthError::UnsupportedToken => write!(f, "unsupported token"),
            AuthError::MalformedToken => write!(f, "malformed token"),
            AuthError::VerificationError(_) => write!(f, "verification error"),
            AuthError::NoPermission => write!(f, "no permission"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
