use thiserror::Error;

use crate::service::ServiceError;

/// Errors produced by the orchestration kernel.
///
/// Nothing here is fatal to the host process: every failure is local and
/// recoverable by retrying the operation or by the supervisor's bounded
/// auto-restart.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("service already registered: {0}")]
    DuplicateService(String),

    #[error("service registry full (capacity {0})")]
    RegistryFull(usize),

    #[error("missing dependency for service {service}: {dependency}")]
    MissingDependency { service: String, dependency: String },

    #[error("dependency cycle detected: {0}")]
    DependencyCycle(String),

    #[error("dependency {dependency} of service {service} failed to start: {source}")]
    DependencyFailed {
        service: String,
        dependency: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("{op} callback failed for service {service}: {source}")]
    CallbackFailed {
        service: String,
        op: &'static str,
        #[source]
        source: ServiceError,
    },

    #[error("event queue full (capacity {0}), event dropped")]
    QueueFull(usize),

    #[error("subscription table full (capacity {0})")]
    SubscriptionsFull(usize),

    #[error("subscription not found: {0}")]
    SubscriptionNotFound(u64),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
