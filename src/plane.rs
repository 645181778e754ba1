//! Owning context for one kernel instance.
//!
//! Everything the kernel tracks — the service catalog, the event queue, the
//! subscription table — lives inside a `CorePlane`. Hosts create as many
//! independent instances as they need; dropping one (or calling `shutdown`)
//! releases every service and subscription.

use std::rc::Rc;
use std::time::Duration;

use tracing::info;

use crate::bus::EventBus;
use crate::config::CoreConfig;
use crate::errors::Result;
use crate::manager::ServiceManager;

/// One orchestration kernel: a service manager and an event bus wired
/// together.
///
/// The host's poll loop is expected to call [`tick`](Self::tick) and
/// [`drain`](Self::drain) periodically (the configured `tick_interval` is
/// the recommended period) and to invoke lifecycle operations synchronously
/// on demand from that same loop.
pub struct CorePlane {
    config: CoreConfig,
    bus: Rc<EventBus>,
    services: ServiceManager,
}

impl CorePlane {
    pub fn new(config: CoreConfig) -> Result<Self> {
        config.validate()?;
        let bus = Rc::new(EventBus::new(
            config.queue_capacity,
            config.max_subscriptions,
        ));
        let services = ServiceManager::new(config.max_services, Rc::clone(&bus));
        info!(
            "orchestration kernel initialized (services={}, queue={}, subscriptions={})",
            config.max_services, config.queue_capacity, config.max_subscriptions
        );
        Ok(Self {
            config,
            bus,
            services,
        })
    }

    pub fn with_defaults() -> Self {
        let config = CoreConfig::default();
        let bus = Rc::new(EventBus::new(
            config.queue_capacity,
            config.max_subscriptions,
        ));
        let services = ServiceManager::new(config.max_services, Rc::clone(&bus));
        Self {
            config,
            bus,
            services,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Recommended host poll period.
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval
    }

    pub fn services(&self) -> &ServiceManager {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceManager {
        &mut self.services
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Shared handle to the bus, for handlers that publish re-entrantly or
    /// collaborators that outlive a borrow of the plane.
    pub fn bus_handle(&self) -> Rc<EventBus> {
        Rc::clone(&self.bus)
    }

    /// Run one supervisor pass over the registry.
    pub fn tick(&mut self) {
        self.services.process();
    }

    /// Dispatch every queued event; returns the count dispatched.
    pub fn drain(&self) -> usize {
        self.bus.drain()
    }

    /// Stop every service, drop the catalog, and clear the event queue and
    /// subscription table.
    pub fn shutdown(&mut self) {
        let stopped = self.services.shutdown();
        self.bus.shutdown();
        info!("orchestration kernel shut down ({} services stopped)", stopped);
    }
}
