//! Service capability interface and descriptors.
//!
//! A service is anything with start/stop/health behavior. The kernel never
//! spawns processes or threads itself; it drives implementations of
//! [`Lifecycle`] synchronously and records the outcome in the registry.

use thiserror::Error;

use crate::restart::RestartConfig;

/// Error returned by a service's own start/stop callbacks.
///
/// Wrapped into [`CoreError::CallbackFailed`](crate::CoreError::CallbackFailed)
/// by the manager so callers can tell a service's own failure apart from
/// kernel-level errors.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ServiceError(pub String);

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The three-operation capability set a managed service implements.
///
/// `health` has a default implementation returning `true`: a running service
/// without its own health probe is considered healthy.
pub trait Lifecycle {
    fn start(&mut self) -> std::result::Result<(), ServiceError>;

    fn stop(&mut self) -> std::result::Result<(), ServiceError>;

    fn health(&self) -> bool {
        true
    }
}

type Callback = Box<dyn FnMut() -> std::result::Result<(), ServiceError>>;

/// Closure-backed [`Lifecycle`] implementation.
///
/// Convenient for hosts wiring existing subsystems into the kernel and for
/// tests. State shared with the outside world lives in the closure captures
/// (typically `Rc<RefCell<..>>` or `Rc<Cell<..>>`).
pub struct CallbackService {
    on_start: Callback,
    on_stop: Callback,
    on_health: Option<Box<dyn Fn() -> bool>>,
}

impl CallbackService {
    pub fn new(
        on_start: impl FnMut() -> std::result::Result<(), ServiceError> + 'static,
        on_stop: impl FnMut() -> std::result::Result<(), ServiceError> + 'static,
    ) -> Self {
        Self {
            on_start: Box::new(on_start),
            on_stop: Box::new(on_stop),
            on_health: None,
        }
    }

    /// A service whose callbacks always succeed. Useful as a placeholder and
    /// in tests that only exercise state transitions.
    pub fn noop() -> Self {
        Self::new(|| Ok(()), || Ok(()))
    }

    pub fn with_health(mut self, on_health: impl Fn() -> bool + 'static) -> Self {
        self.on_health = Some(Box::new(on_health));
        self
    }
}

impl Lifecycle for CallbackService {
    fn start(&mut self) -> std::result::Result<(), ServiceError> {
        (self.on_start)()
    }

    fn stop(&mut self) -> std::result::Result<(), ServiceError> {
        (self.on_stop)()
    }

    fn health(&self) -> bool {
        match &self.on_health {
            Some(probe) => probe(),
            None => true,
        }
    }
}

/// Static definition of a named unit: identity, declared dependencies,
/// restart policy, and the capability handle the manager drives.
///
/// The name is case-sensitive and immutable after registration. Dependency
/// names are resolved at start time, in declared order; they do not have to
/// be registered yet at registration time.
pub struct ServiceDescriptor {
    pub name: String,
    pub depends_on: Vec<String>,
    pub restart: RestartConfig,
    pub service: Box<dyn Lifecycle>,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>, service: impl Lifecycle + 'static) -> Self {
        Self {
            name: name.into(),
            depends_on: Vec::new(),
            restart: RestartConfig::default(),
            service: Box::new(service),
        }
    }

    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.depends_on = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_restart(mut self, restart: RestartConfig) -> Self {
        self.restart = restart;
        self
    }
}

impl std::fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("name", &self.name)
            .field("depends_on", &self.depends_on)
            .field("restart", &self.restart)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
