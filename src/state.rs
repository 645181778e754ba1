use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

/// Lifecycle state of a managed service.
///
/// There is no terminal state: `Failed` is always retryable by a later
/// `start`, either manual or through the supervisor's auto-restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Stopped,
    Starting,
    Running,
    Stopping,
    Failed,
    /// Transient marker set by the supervisor just before a restart attempt.
    Restarting,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Stopped => "stopped",
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::Stopping => "stopping",
            LifecycleState::Failed => "failed",
            LifecycleState::Restarting => "restarting",
        }
    }

    /// Running or on the way up.
    pub fn is_active(&self) -> bool {
        matches!(self, LifecycleState::Running | LifecycleState::Starting)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable runtime record for a registered service.
///
/// Owned exclusively by the registry; every transition goes through the
/// manager's documented operations.
#[derive(Debug, Clone)]
pub struct ServiceRuntime {
    pub state: LifecycleState,
    pub restart_count: u32,
    pub started_at: Option<DateTime<Utc>>,
    /// Monotonic stamp of the last supervised restart attempt, used for
    /// restart-delay spacing.
    pub last_restart_at: Option<Instant>,
}

impl Default for ServiceRuntime {
    fn default() -> Self {
        Self {
            state: LifecycleState::Stopped,
            restart_count: 0,
            started_at: None,
            last_restart_at: None,
        }
    }
}
