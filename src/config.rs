//! Kernel configuration.
//!
//! Capacities for the bounded tables backing the registry, the event queue,
//! and the subscription table, plus the recommended supervisor tick interval.
//! Loaded from YAML by hosts that keep kernel sizing in their config store.

pub mod duration;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use self::duration::{deserialize_duration, serialize_duration};
use crate::errors::{CoreError, Result};

/// Default registry capacity.
pub const DEFAULT_MAX_SERVICES: usize = 64;
/// Default event queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
/// Default subscription table capacity.
pub const DEFAULT_MAX_SUBSCRIPTIONS: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub max_services: usize,
    pub queue_capacity: usize,
    pub max_subscriptions: usize,
    /// Recommended host poll period for `tick`/`drain`. Informational: the
    /// kernel never schedules anything itself.
    #[serde(
        serialize_with = "serialize_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub tick_interval: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_services: DEFAULT_MAX_SERVICES,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_subscriptions: DEFAULT_MAX_SUBSCRIPTIONS,
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl CoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_services == 0 {
            return Err(CoreError::Config("max_services must be nonzero".into()));
        }
        if self.queue_capacity == 0 {
            return Err(CoreError::Config("queue_capacity must be nonzero".into()));
        }
        if self.max_subscriptions == 0 {
            return Err(CoreError::Config(
                "max_subscriptions must be nonzero".into(),
            ));
        }
        if self.tick_interval.is_zero() {
            return Err(CoreError::Config("tick_interval must be nonzero".into()));
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: CoreConfig =
            serde_yaml::from_str(s).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
