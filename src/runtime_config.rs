//! # Runtime Configuration Module
//!
//! Environment-driven settings that tune how a [`Router`](crate::router::Router)
//! behaves at request time.
//!
//! ## Environment Variables
//!
//! ### `ROUTEMUX_SLOW_MATCH_US`
//!
//! Route lookups slower than this many microseconds are logged at `warn`.
//! Accepts decimal (`1000`) or hexadecimal (`0x3e8`).
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use routemux::runtime_config::RuntimeConfig;
//! use routemux::router::Router;
//!
//! let router = Router::with_config(RuntimeConfig::from_env());
//! ```

use std::env;
use std::time::Duration;

/// Default slow-match threshold in microseconds.
pub const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Lookups taking longer than this are reported as slow
    pub slow_match_threshold: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let micros = env::var("ROUTEMUX_SLOW_MATCH_US")
            .ok()
            .and_then(|val| parse_number(&val))
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        RuntimeConfig {
            slow_match_threshold: Duration::from_micros(micros),
        }
    }
}

/// Decimal or `0x`-prefixed hexadecimal.
fn parse_number(val: &str) -> Option<u64> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}
