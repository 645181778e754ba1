//! Auto-restart policy for supervised services.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::config::duration::{deserialize_duration, serialize_duration};

/// Bounded, delay-spaced auto-restart policy.
///
/// Enforced only by the supervisor tick; the manual `restart` operation
/// bypasses it entirely.
///
/// `max_attempts == 0` means unlimited attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestartConfig {
    pub auto_restart: bool,
    #[serde(
        serialize_with = "serialize_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            auto_restart: false,
            delay: Duration::from_secs(1),
            max_attempts: 0,
        }
    }
}

impl RestartConfig {
    /// Policy that never restarts. Same as `Default`, spelled out.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Restart after `delay`, up to `max_attempts` times (0 = unlimited).
    pub fn bounded(delay: Duration, max_attempts: u32) -> Self {
        Self {
            auto_restart: true,
            delay,
            max_attempts,
        }
    }

    /// True once the attempt budget is spent. Unlimited when `max_attempts`
    /// is zero.
    pub fn attempts_exhausted(&self, restart_count: u32) -> bool {
        self.max_attempts > 0 && restart_count >= self.max_attempts
    }

    /// True when enough time has passed since the last attempt, or no
    /// attempt has been made yet.
    pub fn delay_elapsed(&self, last_attempt: Option<Instant>, now: Instant) -> bool {
        match last_attempt {
            None => true,
            Some(last) => now.duration_since(last) >= self.delay,
        }
    }
}

#[cfg(test)]
mod tests;
