//! Service lifecycle controller and supervisor.
//!
//! `ServiceManager` owns the registry and drives every state transition:
//! registration, dependency-ordered start, stop, manual restart, and the
//! periodic supervisor pass that applies the auto-restart policy to failed
//! services. Lifecycle transitions are announced on the event bus
//! (`ServiceStarted` / `ServiceStopped` / `ServiceCrashed`); publishing is
//! fire-and-forget so a full queue never fails a lifecycle operation.

use std::rc::Rc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::bus::EventBus;
use crate::deps;
use crate::errors::{CoreError, Result};
use crate::events::{Event, EventKind, EventPriority};
use crate::registry::Registry;
use crate::service::ServiceDescriptor;
use crate::state::LifecycleState;

pub struct ServiceManager {
    registry: Registry,
    bus: Rc<EventBus>,
}

impl ServiceManager {
    pub fn new(max_services: usize, bus: Rc<EventBus>) -> Self {
        Self {
            registry: Registry::with_capacity(max_services),
            bus,
        }
    }

    /// Register a service. The entry starts `Stopped` with zero restart
    /// counters; nothing is started here.
    pub fn register(&mut self, descriptor: ServiceDescriptor) -> Result<()> {
        debug!("registering service {}", descriptor.name);
        self.registry.insert(descriptor)
    }

    /// Remove a service, stopping it first if it is running.
    ///
    /// A failing stop callback is logged and removal proceeds: an
    /// unregistered service must not linger in the catalog because its own
    /// teardown misbehaved.
    pub fn unregister(&mut self, name: &str) -> Result<()> {
        let state = match self.registry.get(name) {
            Some(entry) => entry.runtime.state,
            None => return Err(CoreError::ServiceNotFound(name.to_string())),
        };

        if state == LifecycleState::Running {
            if let Err(err) = self.stop(name) {
                warn!(
                    "unregister: stop failed for service {}, removing anyway: {}",
                    name, err
                );
            }
        }

        self.registry.remove(name)?;
        info!("service {} unregistered", name);
        Ok(())
    }

    /// Start a service, starting its declared dependencies first.
    ///
    /// No-op success when the service is already `Running` or `Starting`.
    /// The dependency graph is checked for cycles up front; a cycle marks
    /// the service `Failed` and fails with `DependencyCycle` rather than
    /// recursing without bound. Dependencies are started recursively in
    /// declared order, short-circuiting on the first failure, which also
    /// marks this service `Failed` without invoking its start callback.
    pub fn start(&mut self, name: &str) -> Result<()> {
        if !self.registry.contains(name) {
            return Err(CoreError::ServiceNotFound(name.to_string()));
        }

        if let Err(err) = deps::ensure_acyclic(&self.registry, name) {
            self.set_state(name, LifecycleState::Failed);
            error!("cannot start service {}: {}", name, err);
            return Err(err);
        }

        self.start_resolved(name)
    }

    /// `start` after the cycle check has passed for the whole subgraph.
    fn start_resolved(&mut self, name: &str) -> Result<()> {
        let (state, dependencies) = match self.registry.get(name) {
            Some(entry) => (entry.runtime.state, entry.descriptor.depends_on.clone()),
            None => return Err(CoreError::ServiceNotFound(name.to_string())),
        };

        if state.is_active() {
            return Ok(());
        }

        for dep in &dependencies {
            let dep_state = self.registry.get(dep).map(|entry| entry.runtime.state);

            let result = match dep_state {
                Some(LifecycleState::Running) => continue,
                Some(_) => self.start_resolved(dep),
                None => Err(CoreError::ServiceNotFound(dep.clone())),
            };

            if let Err(err) = result {
                self.set_state(name, LifecycleState::Failed);
                let wrapped = match err {
                    CoreError::ServiceNotFound(missing) if missing == *dep => {
                        CoreError::MissingDependency {
                            service: name.to_string(),
                            dependency: dep.clone(),
                        }
                    }
                    other => CoreError::DependencyFailed {
                        service: name.to_string(),
                        dependency: dep.clone(),
                        source: Box::new(other),
                    },
                };
                warn!("service {} not started: {}", name, wrapped);
                return Err(wrapped);
            }
        }

        self.set_state(name, LifecycleState::Starting);
        debug!("starting service {}", name);

        let start_result = match self.registry.get_mut(name) {
            Some(entry) => entry.descriptor.service.start(),
            None => return Err(CoreError::ServiceNotFound(name.to_string())),
        };

        match start_result {
            Ok(()) => {
                if let Some(entry) = self.registry.get_mut(name) {
                    entry.runtime.state = LifecycleState::Running;
                    entry.runtime.started_at = Some(Utc::now());
                }
                info!("service {} running", name);
                self.emit(EventKind::ServiceStarted, EventPriority::Normal, name);
                Ok(())
            }
            Err(err) => {
                self.set_state(name, LifecycleState::Failed);
                error!("start callback failed for service {}: {}", name, err);
                self.emit(EventKind::ServiceCrashed, EventPriority::High, name);
                Err(CoreError::CallbackFailed {
                    service: name.to_string(),
                    op: "start",
                    source: err,
                })
            }
        }
    }

    /// Stop a service. No-op success when already `Stopped` or `Stopping`.
    ///
    /// Never cascades to dependents: services depending on this one are left
    /// untouched and observe the consequence through their own health or
    /// restart logic.
    pub fn stop(&mut self, name: &str) -> Result<()> {
        let state = match self.registry.get(name) {
            Some(entry) => entry.runtime.state,
            None => return Err(CoreError::ServiceNotFound(name.to_string())),
        };

        if matches!(state, LifecycleState::Stopped | LifecycleState::Stopping) {
            return Ok(());
        }

        self.set_state(name, LifecycleState::Stopping);
        debug!("stopping service {}", name);

        let stop_result = match self.registry.get_mut(name) {
            Some(entry) => entry.descriptor.service.stop(),
            None => return Err(CoreError::ServiceNotFound(name.to_string())),
        };

        match stop_result {
            Ok(()) => {
                if let Some(entry) = self.registry.get_mut(name) {
                    entry.runtime.state = LifecycleState::Stopped;
                    entry.runtime.started_at = None;
                }
                info!("service {} stopped", name);
                self.emit(EventKind::ServiceStopped, EventPriority::Normal, name);
                Ok(())
            }
            Err(err) => {
                self.set_state(name, LifecycleState::Failed);
                error!("stop callback failed for service {}: {}", name, err);
                self.emit(EventKind::ServiceCrashed, EventPriority::High, name);
                Err(CoreError::CallbackFailed {
                    service: name.to_string(),
                    op: "stop",
                    source: err,
                })
            }
        }
    }

    /// Sequential stop-then-start with no delay. This manual path bypasses
    /// the supervisor's delay and attempt accounting.
    pub fn restart(&mut self, name: &str) -> Result<()> {
        self.stop(name)?;
        self.start(name)
    }

    /// Current lifecycle state, or `ServiceNotFound` for an unknown name.
    pub fn get_state(&self, name: &str) -> Result<LifecycleState> {
        match self.registry.get(name) {
            Some(entry) => Ok(entry.runtime.state),
            None => Err(CoreError::ServiceNotFound(name.to_string())),
        }
    }

    /// False for unknown or non-running services; otherwise the service's
    /// health capability (true when it has none).
    pub fn is_healthy(&self, name: &str) -> bool {
        match self.registry.get(name) {
            Some(entry) => {
                entry.runtime.state == LifecycleState::Running
                    && entry.descriptor.service.health()
            }
            None => false,
        }
    }

    /// Start every registered service in registration order. Failures are
    /// logged and do not abort the loop; returns the success count.
    pub fn start_all(&mut self) -> usize {
        let mut started = 0;
        for name in self.registry.names() {
            match self.start(&name) {
                Ok(()) => started += 1,
                Err(err) => warn!("start_all: {}", err),
            }
        }
        started
    }

    /// Stop every registered service in registration order; returns the
    /// success count.
    pub fn stop_all(&mut self) -> usize {
        let mut stopped = 0;
        for name in self.registry.names() {
            match self.stop(&name) {
                Ok(()) => stopped += 1,
                Err(err) => warn!("stop_all: {}", err),
            }
        }
        stopped
    }

    /// Registered names in registration order (not start order).
    pub fn list(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Supervisor pass: invoke periodically from the host loop.
    pub fn process(&mut self) {
        self.process_at(Instant::now());
    }

    /// Supervisor pass against an explicit clock reading. Hosts with their
    /// own time source, and tests, drive this directly.
    ///
    /// Running services have their health evaluated for observability; an
    /// unhealthy-but-running service is logged and left alone. Failed
    /// services with `auto_restart` are retried once their restart delay has
    /// elapsed, until the attempt budget is spent, after which they stay
    /// `Failed` permanently.
    pub fn process_at(&mut self, now: Instant) {
        for name in self.registry.names() {
            let entry = match self.registry.get(&name) {
                Some(entry) => entry,
                None => continue,
            };
            let state = entry.runtime.state;

            match state {
                LifecycleState::Running => {
                    if !entry.descriptor.service.health() {
                        warn!("service {} is running but reports unhealthy", name);
                    }
                }
                LifecycleState::Failed if entry.descriptor.restart.auto_restart => {
                    let restart = entry.descriptor.restart.clone();
                    let count = entry.runtime.restart_count;
                    let last = entry.runtime.last_restart_at;

                    if restart.attempts_exhausted(count) {
                        debug!(
                            "service {}: restart attempts exhausted ({}), leaving failed",
                            name, count
                        );
                        continue;
                    }
                    if !restart.delay_elapsed(last, now) {
                        continue;
                    }

                    if let Some(entry) = self.registry.get_mut(&name) {
                        entry.runtime.restart_count += 1;
                        entry.runtime.last_restart_at = Some(now);
                        entry.runtime.state = LifecycleState::Restarting;
                    }
                    info!(
                        "supervisor restarting service {} (attempt {})",
                        name,
                        count + 1
                    );
                    if let Err(err) = self.start(&name) {
                        warn!("supervised restart of {} failed: {}", name, err);
                    }
                }
                _ => {}
            }
        }
    }

    /// Stop everything and drop the catalog. Returns the stop success count.
    pub fn shutdown(&mut self) -> usize {
        let stopped = self.stop_all();
        self.registry.clear();
        stopped
    }

    fn set_state(&mut self, name: &str, state: LifecycleState) {
        if let Some(entry) = self.registry.get_mut(name) {
            entry.runtime.state = state;
        }
    }

    fn emit(&self, kind: EventKind, priority: EventPriority, service: &str) {
        let event = Event::new(kind, priority, Vec::new(), service);
        if let Err(err) = self.bus.publish(event) {
            warn!(
                "failed to publish {} event for {}: {}",
                kind.as_str(),
                service,
                err
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }
}
