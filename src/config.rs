use std::{env, str::FromStr, time::Duration};

use tracing::warn;

pub const DEFAULT_EXPIRY_SECS: u64 = 600;
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 120_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Age at which an unfinished game is considered lost.
    pub expiry_secs: u64,
    pub sweep_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expiry_secs: DEFAULT_EXPIRY_SECS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}, using default", key, raw);
            default
        }),
    }
}

impl Config {
    /// Reads `GAME_EXPIRY_SECONDS` and `SWEEP_INTERVAL_MILLIS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            expiry_secs: parse_or(
                "GAME_EXPIRY_SECONDS",
                lookup("GAME_EXPIRY_SECONDS"),
                DEFAULT_EXPIRY_SECS,
            ),
            sweep_interval_ms: parse_or(
                "SWEEP_INTERVAL_MILLIS",
                lookup("SWEEP_INTERVAL_MILLIS"),
                DEFAULT_SWEEP_INTERVAL_MS,
            ),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        // tokio's interval panics on a zero period
        Duration::from_millis(self.sweep_interval_ms.max(1))
    }
}
