// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.
//!
//! Reads take the store's read lock; mutations hold the write lock for the
//! whole lifecycle call.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::{Auth, AuthenticatedUser, UserId},
    error::ApiError,
    models::{DeleteUserResponse, UserPatchRequest, UserResponse},
    state::AppState,
    users::UserService,
};

/// Get the current authenticated user's identity, as carried by the token.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller identity", body = AuthenticatedUser),
        (status = 400, description = "Token missing or malformed"),
        (status = 401, description = "Token invalid or expired")
    )
)]
pub async fn get_current_user(Auth(user): Auth) -> Json<AuthenticatedUser> {
    Json(user)
}

/// Get a user's profile.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "User has been deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>, ApiError> {
    let store = state.store.read().await;
    let user = UserService::new(&*store).get_user(id)?;
    Ok(Json(user))
}

/// Update the caller's own profile.
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserPatchRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "User deleted or address pair incomplete"),
        (status = 403, description = "Not the caller's account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(patch): Json<UserPatchRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let mut store = state.store.write().await;
    let updated = UserService::new(&mut *store).update_user(&user, id, patch)?;

    tracing::info!(user_id = id, "Profile updated");
    Ok(Json(updated))
}

/// Soft-delete the caller's own account.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Account deleted", body = DeleteUserResponse),
        (status = 400, description = "User already deleted"),
        (status = 403, description = "Not the caller's account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    let mut store = state.store.write().await;
    let deleted_id = UserService::new(&mut *store).delete_user(id, &user)?;

    tracing::info!(user_id = deleted_id, "Account deleted");
    Ok(Json(DeleteUserResponse {
        id: deleted_id,
        message: "Account deleted successfully".to_string(),
    }))
}
