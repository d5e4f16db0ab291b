// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 access tokens: verification and issuance.
//!
//! ## Verification order
//!
//! 1. Empty token → `MalformedClaims`
//! 2. Header decode (structure → `InvalidSignature`, unknown header or
//!    algorithm → `UnsupportedFormat`)
//! 3. Expiry peek on the unverified payload → `Expired`
//! 4. Signature and registered-claim validation
//! 5. Identity claim parsing (`sub` as user id, `userRole` as [`Role`])
//!
//! Expiry is peeked before the signature is checked so that an expired token
//! reports `Expired` whatever its signature. The peek only ever rejects.

use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, get_current_timestamp, Algorithm,
    DecodingKey, EncodingKey, Header, Validation,
};
use serde::Deserialize;

use super::claims::{AuthenticatedUser, TokenClaims, UserId};
use super::roles::Role;

/// Authorization scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// The only algorithm tokens are issued and accepted with.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token verification failure kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// Signature mismatch or structurally broken token
    #[error("token signature is invalid")]
    InvalidSignature,

    /// `exp` claim is in the past
    #[error("token has expired")]
    Expired,

    /// Unreadable header or unexpected algorithm
    #[error("token format is not supported")]
    UnsupportedFormat,

    /// Required claims missing or unparsable
    #[error("token claims are malformed: {0}")]
    MalformedClaims(String),

    /// Anything the other kinds do not cover
    #[error("token verification failed: {0}")]
    Other(String),
}

/// Capability to turn a raw bearer token into an identity.
pub trait VerifyToken {
    /// Verify `token` (scheme prefix already stripped).
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, VerifyError>;
}

/// Strip the `Bearer ` scheme from an `Authorization` header value.
///
/// The scheme is matched case-sensitively with exactly one space.
pub fn strip_bearer(header_value: &str) -> Option<&str> {
    header_value.strip_prefix(BEARER_PREFIX)
}

/// Minimal payload view used for the expiry peek.
#[derive(Debug, Deserialize)]
struct ExpiryProbe {
    #[serde(default)]
    exp: Option<u64>,
}

/// Verifies HS256 tokens against a shared secret.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
    leeway: u64,
}

impl JwtVerifier {
    /// Create a verifier for `secret` with `leeway` seconds of clock skew.
    pub fn new(secret: &[u8], leeway: u64) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = leeway;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
            leeway,
        }
    }

    fn is_expired(&self, token: &str) -> bool {
        match jsonwebtoken::dangerous::insecure_decode::<ExpiryProbe>(token) {
            Ok(data) => data
                .claims
                .exp
                .is_some_and(|exp| exp.saturating_add(self.leeway) < get_current_timestamp()),
            // Let the verified decode classify the payload
            Err(_) => false,
        }
    }
}

impl VerifyToken for JwtVerifier {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, VerifyError> {
        if token.is_empty() {
            return Err(VerifyError::MalformedClaims("token is empty".to_string()));
        }

        let header = decode_header(token).map_err(|e| match e.kind() {
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => {
                VerifyError::InvalidSignature
            }
            _ => VerifyError::UnsupportedFormat,
        })?;

        if header.alg != ALGORITHM {
            return Err(VerifyError::UnsupportedFormat);
        }

        if self.is_expired(token) {
            return Err(VerifyError::Expired);
        }

        let token_data = decode::<TokenClaims>(token, &self.key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Utf8(_) => VerifyError::InvalidSignature,
                ErrorKind::ExpiredSignature => VerifyError::Expired,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    VerifyError::UnsupportedFormat
                }
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    VerifyError::MalformedClaims(e.to_string())
                }
                _ => VerifyError::Other(e.to_string()),
            })?;

        identity_from_claims(token_data.claims)
    }
}

/// Convert verified claims into the request identity.
fn identity_from_claims(claims: TokenClaims) -> Result<AuthenticatedUser, VerifyError> {
    let user_id = claims.sub.parse::<UserId>().map_err(|_| {
        VerifyError::MalformedClaims(format!("subject '{}' is not a user id", claims.sub))
    })?;

    let role = Role::from_str(&claims.user_role).ok_or_else(|| {
        VerifyError::MalformedClaims(format!("unknown role '{}'", claims.user_role))
    })?;

    if claims.email.is_empty() {
        return Err(VerifyError::MalformedClaims("email is empty".to_string()));
    }

    Ok(AuthenticatedUser {
        user_id,
        email: claims.email,
        role,
    })
}

/// Issues HS256 tokens with a fixed lifetime.
#[derive(Clone)]
pub struct JwtIssuer {
    key: EncodingKey,
    ttl_secs: u64,
}

impl JwtIssuer {
    /// Create an issuer for `secret` whose tokens live `ttl_secs` seconds.
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            key: EncodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Issue a token for the given identity, valid from now for the
    /// configured lifetime.
    pub fn issue(
        &self,
        user_id: UserId,
        email: &str,
        role: Role,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = get_current_timestamp();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            user_role: role.as_str().to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims.
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(ALGORITHM), claims, &self.key)
    }
}
