// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::users::DomainError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NotFound(_) => Self::not_found(message),
            DomainError::InvalidState(_) | DomainError::InvalidArgument(_) => {
                Self::bad_request(message)
            }
            DomainError::Forbidden(_) => Self::forbidden(message),
            DomainError::Conflict(_) => Self::conflict(message),
            DomainError::InvalidCredentials => Self::unauthorized(message),
            DomainError::PasswordHash(detail) => {
                tracing::error!(error = %detail, "Password hashing failure");
                Self::internal("internal error")
            }
            DomainError::Store(store_err) => {
                tracing::error!(error = %store_err, "User store failure");
                Self::internal("internal error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use crate::users::error::{DELETED_USER, NO_PERMISSION};
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let conflict = ApiError::conflict("taken");
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert_eq!(conflict.message, "taken");
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::NotFound(3), StatusCode::NOT_FOUND),
            (DomainError::InvalidState(DELETED_USER), StatusCode::BAD_REQUEST),
            (DomainError::Forbidden(NO_PERMISSION), StatusCode::FORBIDDEN),
            (
                DomainError::InvalidArgument("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::Conflict("dup".to_string()), StatusCode::CONFLICT),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        ];

        for (err, status) in cases {
            let message = err.to_string();
            let api = ApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.message, message);
        }
    }

    #[test]
    fn store_failure_detail_is_not_exposed() {
        let api = ApiError::from(DomainError::Store(StoreError::Unavailable(
            "disk on fire".to_string(),
        )));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "internal error");
    }

    #[test]
    fn password_hash_failure_is_internal_and_not_exposed() {
        let api = ApiError::from(DomainError::PasswordHash("salt length".to_string()));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "internal error");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::from(DomainError::InvalidState(DELETED_USER)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"deleted user"}"#);
    }
}
