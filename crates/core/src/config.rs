//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into services. Request handlers never read process-wide environment variables, which
//! keeps behaviour consistent across multi-threaded runtimes and test harnesses.

use crate::constants::{DEFAULT_MAX_ENTRIES, DEFAULT_REST_ADDR};
use crate::{IntakeError, IntakeResult};
use std::net::SocketAddr;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    rest_addr: SocketAddr,
    max_entries: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidConfig` if `max_entries` is zero.
    pub fn new(rest_addr: SocketAddr, max_entries: usize) -> IntakeResult<Self> {
        if max_entries == 0 {
            return Err(IntakeError::InvalidConfig(
                "max_entries must be greater than zero".into(),
            ));
        }

        Ok(Self {
            rest_addr,
            max_entries,
        })
    }

    /// Build a configuration from optional raw values, typically the contents of
    /// `INTAKE_REST_ADDR` and `INTAKE_MAX_ENTRIES`.
    ///
    /// `None` or whitespace-only values fall back to the defaults.
    pub fn from_env_values(
        rest_addr: Option<String>,
        max_entries: Option<String>,
    ) -> IntakeResult<Self> {
        let rest_addr = rest_addr_from_env_value(rest_addr)?;
        let max_entries = max_entries_from_env_value(max_entries)?;
        Self::new(rest_addr, max_entries)
    }

    /// Read `INTAKE_REST_ADDR` and `INTAKE_MAX_ENTRIES` from the process environment.
    ///
    /// Call this once at startup.
    pub fn from_env() -> IntakeResult<Self> {
        Self::from_env_values(
            std::env::var("INTAKE_REST_ADDR").ok(),
            std::env::var("INTAKE_MAX_ENTRIES").ok(),
        )
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            rest_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the REST listen address, falling back to [`DEFAULT_REST_ADDR`].
pub fn rest_addr_from_env_value(value: Option<String>) -> IntakeResult<SocketAddr> {
    let raw = non_blank(value).unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
    raw.parse::<SocketAddr>().map_err(|e| {
        IntakeError::InvalidConfig(format!("INTAKE_REST_ADDR '{raw}' is not a socket address: {e}"))
    })
}

/// Parse the entry limit, falling back to [`DEFAULT_MAX_ENTRIES`].
pub fn max_entries_from_env_value(value: Option<String>) -> IntakeResult<usize> {
    match non_blank(value) {
        None => Ok(DEFAULT_MAX_ENTRIES),
        Some(raw) => raw.parse::<usize>().map_err(|e| {
            IntakeError::InvalidConfig(format!("INTAKE_MAX_ENTRIES '{raw}' is not a count: {e}"))
        }),
    }
}
