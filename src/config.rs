// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup by [`EngineConfig::from_env`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `XRPL_POLL_INTERVAL_MS` | Delay between transaction polls | `4000` |
//! | `XRPL_MAX_WAIT_SECS` | Wall-clock ceiling for polling, `0` disables | `120` |
//! | `XRPL_LEDGER_MARGIN` | Ledgers added to the validated index for `LastLedgerSequence` | `4` |
//! | `SEED_VAULT_SECRET` | Secret the seed vault key is derived from (min. 16 bytes) | Required |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use zeroize::Zeroizing;

use crate::ledger::lifecycle::{DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL};
use crate::ledger::payment::DEFAULT_LEDGER_MARGIN;
use crate::ledger::{LifecycleConfig, XrplError, XrplResult};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const POLL_INTERVAL_ENV: &str = "XRPL_POLL_INTERVAL_MS";
pub const MAX_WAIT_ENV: &str = "XRPL_MAX_WAIT_SECS";
pub const LEDGER_MARGIN_ENV: &str = "XRPL_LEDGER_MARGIN";

/// Secret for the seed vault.
///
/// The AES-256 key is derived from it with HMAC-SHA256. Rotating it makes
/// every previously sealed seed unreadable.
pub const SEED_VAULT_SECRET_ENV: &str = "SEED_VAULT_SECRET";

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Process configuration.
#[derive(Clone)]
pub struct EngineConfig {
    pub host: String,
    pub port: u16,
    pub lifecycle: LifecycleConfig,
    pub vault_secret: Zeroizing<String>,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("lifecycle", &self.lifecycle)
            .field("vault_secret", &"<redacted>")
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl EngineConfig {
    pub fn from_env() -> XrplResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> XrplResult<Self> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(var(PORT_ENV), PORT_ENV, DEFAULT_PORT)?;

        let poll_ms = parse_or(
            var(POLL_INTERVAL_ENV),
            POLL_INTERVAL_ENV,
            DEFAULT_POLL_INTERVAL.as_millis() as u64,
        )?;
        if poll_ms == 0 {
            return Err(XrplError::Configuration(format!(
                "{POLL_INTERVAL_ENV} must be positive"
            )));
        }
        let max_wait_secs = parse_or(var(MAX_WAIT_ENV), MAX_WAIT_ENV, DEFAULT_MAX_WAIT.as_secs())?;
        let ledger_margin = parse_or(var(LEDGER_MARGIN_ENV), LEDGER_MARGIN_ENV, DEFAULT_LEDGER_MARGIN)?;

        let vault_secret = var(SEED_VAULT_SECRET_ENV).map(Zeroizing::new).ok_or_else(|| {
            XrplError::Configuration(format!("{SEED_VAULT_SECRET_ENV} is not set"))
        })?;

        let log_format = match var(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            host,
            port,
            lifecycle: LifecycleConfig {
                poll_interval: Duration::from_millis(poll_ms),
                max_wait: (max_wait_secs > 0).then(|| Duration::from_secs(max_wait_secs)),
                ledger_margin,
            },
            vault_secret,
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, name: &str, default: T) -> XrplResult<T> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| XrplError::Configuration(format!("{name} has invalid value `{raw}`"))),
    }
}
