// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The mail settings belong to the email-link sign-in provider; they are
//! required here so a misconfigured deployment fails at startup rather than
//! on the first sign-in attempt.

use std::env;
use std::str::FromStr;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Flattened JSON events for log collectors
    #[default]
    Json,
    /// Human-readable, for local development
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "development" => Ok(LogFormat::Pretty),
            other => Err(ConfigError::Invalid {
                name: "LOG_FORMAT",
                reason: format!("unknown format {other:?}"),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SMTP URL of the sign-in mail server
    pub email_server: String,
    /// Sender address for sign-in mails
    pub email_from: String,
    /// Base tracing filter directive, used when `RUST_LOG` is unset
    pub log_level: String,
    pub log_format: LogFormat,
    /// HS256 key for session tokens (raw bytes)
    pub session_secret: Vec<u8>,
    pub database_url: String,
    /// Allowed CORS origin
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            email_server: "smtp://localhost:1025".to_string(),
            email_from: "noreply@localhost".to_string(),
            log_level: "debug".to_string(),
            log_format: LogFormat::Pretty,
            session_secret: b"test_session_secret_32_bytes_min!".to_vec(),
            database_url: "sqlite::memory:".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("not a port number: {raw:?}"),
            })?,
            None => 8080,
        };
        let log_format = match get("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            email_server: required("EMAIL_SERVER")?,
            email_from: required("EMAIL_FROM")?,
            log_level: required("LOG_LEVEL")?,
            log_format,
            session_secret: required("SESSION_SECRET")?.into_bytes(),
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://workouts.db".to_string()),
            frontend_url: get("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            port,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("EMAIL_SERVER", "smtp://mail:25"),
        ("EMAIL_FROM", "lift@example.com"),
        ("LOG_LEVEL", "info"),
        ("SESSION_SECRET", "s3cret"),
    ];

    #[test]
    fn test_config_from_vars() {
        let config = Config::from_lookup(lookup(REQUIRED)).expect("Config should load");

        assert_eq!(config.email_from, "lift@example.com");
        assert_eq!(config.session_secret, b"s3cret");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.database_url, "sqlite://workouts.db");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_required_fails_fast() {
        for skip in ["EMAIL_SERVER", "EMAIL_FROM", "LOG_LEVEL", "SESSION_SECRET"] {
            let vars: Vec<_> = REQUIRED.iter().copied().filter(|(k, _)| *k != skip).collect();
            let err = Config::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, ConfigError::Missing(name) if name == skip));
        }
    }

    #[test]
    fn test_optional_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("LOG_FORMAT", "development"),
            ("PORT", "9000"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.port, 9000);

        vars.push(("PORT", "nope"));
        let vars: Vec<_> = vars.into_iter().filter(|(k, v)| *k != "PORT" || *v == "nope").collect();
        assert!(matches!(
            Config::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
    }
}
