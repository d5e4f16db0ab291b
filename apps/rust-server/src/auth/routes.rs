// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Route classification.
//!
//! Every request is classified from its method and path alone, before any
//! identity is known. The rules live in one ordered table, evaluated top to
//! bottom; the first matching rule wins and anything unmatched requires a
//! `USER` token.
//!
//! | # | Methods | Path | Class |
//! |---|---------|------|-------|
//! | 1 | any | `/api/auth/signin`, `/api/auth/signup` (exact) | `Public` |
//! | 2 | POST, PATCH, DELETE | `/api/eats*` | `RequiresOwner` |
//! | 3 | any | `^/api/restaurant/.*/order$` | `RequiresOwner` |
//! | 4 | any | `/api/owner*` | `RequiresOwner` |
//! | 5 | any | `/api/orderStatus*` | `RequiresOwner` |
//! | - | - | fallback | `RequiresUser` |

use std::sync::LazyLock;

use axum::http::Method;
use regex::Regex;

use super::roles::Role;

/// Privilege level a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// No token needed
    Public,
    /// Restaurant-owner token needed
    RequiresOwner,
    /// Customer token needed
    RequiresUser,
}

impl RouteClass {
    /// Whether an identity with `role` may use a route of this class.
    pub fn admits(self, role: Role) -> bool {
        match (self, role) {
            (RouteClass::Public, _) => true,
            (RouteClass::RequiresOwner, Role::Owner) => true,
            (RouteClass::RequiresOwner, Role::User) => false,
            (RouteClass::RequiresUser, Role::User) => true,
            (RouteClass::RequiresUser, Role::Owner) => false,
        }
    }
}

/// How a rule matches the request path.
enum PathMatch {
    Exact(&'static [&'static str]),
    Prefix(&'static str),
    Pattern(Regex),
}

impl PathMatch {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathMatch::Exact(paths) => paths.contains(&path),
            PathMatch::Prefix(prefix) => path.starts_with(prefix),
            PathMatch::Pattern(regex) => regex.is_match(path),
        }
    }
}

/// One row of the classification table.
struct RouteRule {
    /// `None` matches every method.
    methods: Option<Vec<Method>>,
    path: PathMatch,
    class: RouteClass,
}

impl RouteRule {
    fn matches(&self, method: &Method, path: &str) -> bool {
        let method_ok = self
            .methods
            .as_ref()
            .is_none_or(|methods| methods.contains(method));
        method_ok && self.path.matches(path)
    }
}

static ROUTE_RULES: LazyLock<Vec<RouteRule>> = LazyLock::new(|| {
    let mutating = vec![Method::POST, Method::PATCH, Method::DELETE];

    vec![
        RouteRule {
            methods: None,
            path: PathMatch::Exact(&["/api/auth/signin", "/api/auth/signup"]),
            class: RouteClass::Public,
        },
        RouteRule {
            methods: Some(mutating),
            path: PathMatch::Prefix("/api/eats"),
            class: RouteClass::RequiresOwner,
        },
        RouteRule {
            methods: None,
            // Anchored on both ends; `.*` may be empty (`/api/restaurant//order`)
            path: PathMatch::Pattern(
                Regex::new(r"^/api/restaurant/.*/order$")
                    .expect("restaurant order pattern is a valid literal"),
            ),
            class: RouteClass::RequiresOwner,
        },
        RouteRule {
            methods: None,
            path: PathMatch::Prefix("/api/owner"),
            class: RouteClass::RequiresOwner,
        },
        RouteRule {
            methods: None,
            path: PathMatch::Prefix("/api/orderStatus"),
            class: RouteClass::RequiresOwner,
        },
    ]
});

/// Classify a request by method and path.
///
/// Pure and total: the same inputs always yield the same class, and any
/// input that no rule recognises falls back to [`RouteClass::RequiresUser`].
pub fn classify(method: &Method, path: &str) -> RouteClass {
    ROUTE_RULES
        .iter()
        .find(|rule| rule.matches(method, path))
        .map(|rule| rule.class)
        .unwrap_or(RouteClass::RequiresUser)
}
