//! # coreplane
//!
//! Process-local orchestration kernel for device-management hosts: a service
//! catalog with a supervised lifecycle state machine, and a priority-ordered
//! publish/subscribe event bus.
//!
//! The kernel is fully synchronous and cooperatively driven. It never spawns
//! threads, blocks on I/O, or schedules anything itself; the host's poll
//! loop invokes [`CorePlane::tick`] (supervisor pass) and [`CorePlane::drain`]
//! (event dispatch) periodically, and calls lifecycle operations on demand
//! from that same loop. Transports, config stores, log sinks, and HAL layers
//! are collaborators on the other side of this API, not part of the kernel.
//!
//! ```rust
//! use coreplane::{
//!     CallbackService, CoreConfig, CorePlane, EventFilter, EventKind, ServiceDescriptor,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut plane = CorePlane::new(CoreConfig::default())?;
//!
//!     plane.bus().subscribe_fn(EventFilter::Kind(EventKind::ServiceStarted), |event| {
//!         println!("{} started", event.source);
//!     })?;
//!
//!     plane.services_mut().register(
//!         ServiceDescriptor::new("storage", CallbackService::noop()),
//!     )?;
//!     plane.services_mut().register(
//!         ServiceDescriptor::new("api", CallbackService::noop())
//!             .with_dependencies(["storage"]),
//!     )?;
//!
//!     plane.services_mut().start("api")?; // starts storage first
//!
//!     // Host loop: periodically
//!     plane.tick();
//!     plane.drain();
//!
//!     plane.shutdown();
//!     Ok(())
//! }
//! ```

pub mod bus;
pub mod config;
pub mod deps;
pub mod errors;
pub mod events;
pub mod manager;
pub mod plane;
pub mod registry;
pub mod restart;
pub mod service;
pub mod state;

pub use bus::{EventBus, EventHandler};
pub use config::CoreConfig;
pub use errors::{CoreError, Result};
pub use events::{Event, EventFilter, EventKind, EventPriority, MAX_SOURCE_LEN};
pub use manager::ServiceManager;
pub use plane::CorePlane;
pub use restart::RestartConfig;
pub use service::{CallbackService, Lifecycle, ServiceDescriptor, ServiceError};
pub use state::{LifecycleState, ServiceRuntime};
