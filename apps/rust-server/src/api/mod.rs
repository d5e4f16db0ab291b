// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    auth::{auth_gate, AuthenticatedUser, Role},
    models::{
        Address, DeleteUserResponse, SigninRequest, SignupRequest, TokenResponse,
        UserPatchRequest, UserResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod users;

/// Build the application router.
///
/// The auth gate wraps every route, including the fallback, so unknown
/// paths are classified and gated like any other.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/signin", post(auth::signin))
        .route("/api/users/me", get(users::get_current_user))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api-doc/openapi.json", get(openapi_json))
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup,
        auth::signin,
        users::get_current_user,
        users::get_user,
        users::update_user,
        users::delete_user
    ),
    components(
        schemas(
            Address,
            AuthenticatedUser,
            DeleteUserResponse,
            Role,
            SigninRequest,
            SignupRequest,
            TokenResponse,
            UserPatchRequest,
            UserResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Account registration and sign-in"),
        (name = "Users", description = "User profile lifecycle")
    )
)]
struct ApiDoc;
