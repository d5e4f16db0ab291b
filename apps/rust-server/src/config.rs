// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults and the startup loader. Configuration
//! is read once from the environment before the server binds.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET_KEY` | Base64 HS256 secret (≥ 32 bytes decoded) | Required |
//! | `JWT_TTL_MINUTES` | Lifetime of issued access tokens | `60` |
//! | `JWT_LEEWAY_SECS` | Clock skew tolerated on `exp` | `0` |
//! | `TLS_CERT_PATH` | PEM certificate chain for HTTPS | Optional |
//! | `TLS_KEY_PATH` | PEM private key for HTTPS | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use base64ct::{Base64, Encoding};

/// Environment variable name for the bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the token signing secret.
///
/// The value is standard (padded) base64. The same secret signs issued
/// tokens and verifies incoming ones.
pub const JWT_SECRET_KEY_ENV: &str = "JWT_SECRET_KEY";

/// Environment variable name for the issued token lifetime, in minutes.
pub const JWT_TTL_MINUTES_ENV: &str = "JWT_TTL_MINUTES";

/// Environment variable name for the expiry leeway, in seconds.
pub const JWT_LEEWAY_SECS_ENV: &str = "JWT_LEEWAY_SECS";

/// Environment variable name for the TLS certificate chain path.
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";

/// Environment variable name for the TLS private key path.
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_JWT_TTL_MINUTES: u64 = 60;
pub const DEFAULT_JWT_LEEWAY_SECS: u64 = 0;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Shortest accepted HS256 secret, in decoded bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Startup configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("JWT_SECRET_KEY must decode to at least 32 bytes, got {0}")]
    SecretTooShort(usize),

    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// PEM file locations for HTTPS serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: Vec<u8>,
    pub jwt_ttl_secs: u64,
    pub jwt_leeway_secs: u64,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?;
        let bind_addr = format!("{host}:{port}")
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: HOST_ENV,
                reason: e.to_string(),
            })?;

        let encoded = lookup(JWT_SECRET_KEY_ENV).ok_or(ConfigError::Missing(JWT_SECRET_KEY_ENV))?;
        let jwt_secret = decode_secret(&encoded)?;

        let ttl_minutes = parse_or(&lookup, JWT_TTL_MINUTES_ENV, DEFAULT_JWT_TTL_MINUTES)?;
        if ttl_minutes == 0 {
            return Err(ConfigError::Invalid {
                name: JWT_TTL_MINUTES_ENV,
                reason: "must be positive".to_string(),
            });
        }
        let jwt_leeway_secs = parse_or(&lookup, JWT_LEEWAY_SECS_ENV, DEFAULT_JWT_LEEWAY_SECS)?;

        let tls = match (lookup(TLS_CERT_PATH_ENV), lookup(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: LOG_FORMAT_ENV,
                    reason: format!("expected `json` or `pretty`, got `{other}`"),
                })
            }
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            jwt_ttl_secs: ttl_minutes * 60,
            jwt_leeway_secs,
            tls,
            log_format,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn decode_secret(encoded: &str) -> Result<Vec<u8>, ConfigError> {
    let secret = Base64::decode_vec(encoded.trim()).map_err(|e| ConfigError::Invalid {
        name: JWT_SECRET_KEY_ENV,
        reason: e.to_string(),
    })?;
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::SecretTooShort(secret.len()));
    }
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET_32: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[(JWT_SECRET_KEY_ENV, SECRET_32)])).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.jwt_secret, b"0123456789abcdef0123456789abcdef");
        assert_eq!(config.jwt_ttl_secs, 3600);
        assert_eq!(config.jwt_leeway_secs, 0);
        assert_eq!(config.tls, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            (JWT_SECRET_KEY_ENV, SECRET_32),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9443"),
            (JWT_TTL_MINUTES_ENV, "5"),
            (JWT_LEEWAY_SECS_ENV, "30"),
            (TLS_CERT_PATH_ENV, "/tls/cert.pem"),
            (TLS_KEY_PATH_ENV, "/tls/key.pem"),
            (LOG_FORMAT_ENV, "json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9443".parse().unwrap());
        assert_eq!(config.jwt_ttl_secs, 300);
        assert_eq!(config.jwt_leeway_secs, 30);
        assert_eq!(
            config.tls,
            Some(TlsPaths {
                cert: "/tls/cert.pem".into(),
                key: "/tls/key.pem".into(),
            })
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn missing_secret_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(JWT_SECRET_KEY_ENV)));
    }

    #[test]
    fn short_secret_is_rejected() {
        // "short-secret" in base64
        let err =
            ServerConfig::from_lookup(lookup(&[(JWT_SECRET_KEY_ENV, "c2hvcnQtc2VjcmV0")])).unwrap_err();
        assert!(matches!(err, ConfigError::SecretTooShort(12)));
    }

    #[test]
    fn non_base64_secret_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[(JWT_SECRET_KEY_ENV, "not base64!")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: JWT_SECRET_KEY_ENV,
                ..
            }
        ));
    }

    #[test]
    fn half_tls_configuration_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[
            (JWT_SECRET_KEY_ENV, SECRET_32),
            (TLS_CERT_PATH_ENV, "/tls/cert.pem"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteTls));
    }

    #[test]
    fn bad_numbers_and_formats_are_rejected() {
        for (name, value) in [
            (PORT_ENV, "http"),
            (JWT_TTL_MINUTES_ENV, "0"),
            (JWT_LEEWAY_SECS_ENV, "-1"),
            (LOG_FORMAT_ENV, "xml"),
        ] {
            let err = ServerConfig::from_lookup(lookup(&[(JWT_SECRET_KEY_ENV, SECRET_32), (name, value)]))
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: n, .. } if n == name),
                "{name}={value}: {err}"
            );
        }
    }
}
