// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sign-up and sign-in endpoints.
//!
//! Both routes are public: the gate forwards them without reading the
//! `Authorization` header. Each returns a freshly issued access token.
//!
//! Password hashing and verification run with no store guard held; the
//! write lock is taken only for the insert itself.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::ApiError,
    models::{SigninRequest, SignupRequest, TokenResponse, User, UserResponse},
    state::AppState,
    users::{credentials, UserService},
};

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid email, password or nickname"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    credentials::validate_signup(&request)?;

    let store = state.store.read().await;
    UserService::new(&*store).ensure_email_available(&request.email)?;
    drop(store);

    let new_user = credentials::hash_signup(request).await?;

    // Re-checked under the write lock; a concurrent sign-up may have won
    let mut store = state.store.write().await;
    let user = UserService::new(&mut *store).register(new_user)?;
    drop(store);

    tracing::info!(user_id = user.id, role = %user.role, "Account registered");

    Ok((StatusCode::CREATED, Json(token_for(&state, &user)?)))
}

/// Sign in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = "Auth",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Account has been deleted"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let SigninRequest { email, password } = request;

    let store = state.store.read().await;
    let account = UserService::new(&*store).account_for_signin(&email);
    drop(store);

    let user = match account {
        Ok(account) => credentials::check_password(account, password).await,
        Err(e) => Err(e),
    }
    .inspect_err(|e| tracing::info!(error = %e, "Sign-in refused"))?;

    Ok(Json(token_for(&state, &user)?))
}

fn token_for(state: &AppState, user: &User) -> Result<TokenResponse, ApiError> {
    let access_token = state
        .auth_config
        .issuer
        .issue(user.id, &user.email, user.role)
        .map_err(|e| {
            tracing::error!(error = %e, user_id = user.id, "Token issuance failed");
            ApiError::internal("internal error")
        })?;

    Ok(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        user: UserResponse::from(user),
    })
}
