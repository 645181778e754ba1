//! Priority-ordered publish/subscribe event bus.
//!
//! The bus is single-threaded by contract: all state sits behind `RefCell`
//! and every operation takes `&self`, so handlers running inside [`drain`]
//! may publish further events or manage subscriptions re-entrantly. Events
//! published during a drain are dispatched within the same `drain` call.
//!
//! Overflow policy is availability over completeness: when the bounded queue
//! is full, `publish` drops the event, logs the drop, and returns an error
//! to the caller. Publishers never block.
//!
//! [`drain`]: EventBus::drain

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::{CoreError, Result};
use crate::events::{bound_source, Event, EventFilter, EventKind, EventPriority};

/// Receives events dispatched by [`EventBus::drain`].
///
/// The event reference is valid only for the duration of the call. Handlers
/// with mutable state use interior mutability; captured state replaces the
/// usual opaque context pointer.
pub trait EventHandler {
    fn on_event(&self, event: &Event);
}

impl<F: Fn(&Event)> EventHandler for F {
    fn on_event(&self, event: &Event) {
        self(event)
    }
}

struct Subscription {
    id: u64,
    filter: EventFilter,
    handler: Rc<dyn EventHandler>,
}

/// Bounded, priority-ordered event bus.
///
/// Deliberately `!Send`/`!Sync`: any multi-threaded use requires an external
/// mutual-exclusion discipline imposed by the host, per the kernel's
/// cooperative single-driver model.
pub struct EventBus {
    queue_capacity: usize,
    max_subscriptions: usize,
    queue: RefCell<VecDeque<Event>>,
    subscriptions: RefCell<Vec<Subscription>>,
    next_subscription_id: Cell<u64>,
}

impl EventBus {
    pub fn new(queue_capacity: usize, max_subscriptions: usize) -> Self {
        Self {
            queue_capacity,
            max_subscriptions,
            queue: RefCell::new(VecDeque::with_capacity(queue_capacity)),
            subscriptions: RefCell::new(Vec::new()),
            next_subscription_id: Cell::new(1),
        }
    }

    /// Enqueue an event, stamping it with the current time.
    ///
    /// Queue order is the bus's sole correctness guarantee: strictly
    /// non-increasing priority, FIFO within a priority band. Returns
    /// [`CoreError::QueueFull`] when the queue is at capacity; the event is
    /// dropped and the drop logged.
    pub fn publish(&self, mut event: Event) -> Result<()> {
        let mut queue = self.queue.borrow_mut();
        if queue.len() >= self.queue_capacity {
            warn!(
                "event queue full (capacity {}), dropping {} event from {}",
                self.queue_capacity,
                event.kind.as_str(),
                event.source
            );
            return Err(CoreError::QueueFull(self.queue_capacity));
        }

        event.timestamp = Utc::now();
        if event.source.len() > crate::events::MAX_SOURCE_LEN {
            event.source = bound_source(&event.source).to_string();
        }

        // Walk past everything with priority >= the new event's, so a new
        // event lands at the back of its own priority band.
        let position = queue
            .iter()
            .position(|queued| queued.priority < event.priority)
            .unwrap_or(queue.len());
        queue.insert(position, event);
        Ok(())
    }

    /// Convenience publish that builds the event and deep-copies the payload.
    pub fn publish_simple(
        &self,
        kind: EventKind,
        priority: EventPriority,
        payload: &[u8],
        source: &str,
    ) -> Result<()> {
        self.publish(Event::new(kind, priority, payload.to_vec(), source))
    }

    /// Allocate a subscription slot. Ids are monotonically increasing and
    /// never reused for the lifetime of the bus.
    pub fn subscribe(&self, filter: EventFilter, handler: Rc<dyn EventHandler>) -> Result<u64> {
        let mut subscriptions = self.subscriptions.borrow_mut();
        if subscriptions.len() >= self.max_subscriptions {
            warn!(
                "subscription table full (capacity {})",
                self.max_subscriptions
            );
            return Err(CoreError::SubscriptionsFull(self.max_subscriptions));
        }

        let id = self.next_subscription_id.get();
        self.next_subscription_id.set(id + 1);
        subscriptions.push(Subscription {
            id,
            filter,
            handler,
        });
        debug!("subscription created: id={} filter={:?}", id, filter);
        Ok(id)
    }

    /// Subscribe with a plain closure.
    pub fn subscribe_fn(
        &self,
        filter: EventFilter,
        handler: impl Fn(&Event) + 'static,
    ) -> Result<u64> {
        self.subscribe(filter, Rc::new(handler))
    }

    /// Deactivate a subscription. A second call with the same id returns
    /// [`CoreError::SubscriptionNotFound`].
    pub fn unsubscribe(&self, id: u64) -> Result<()> {
        let mut subscriptions = self.subscriptions.borrow_mut();
        match subscriptions.iter().position(|sub| sub.id == id) {
            Some(index) => {
                subscriptions.remove(index);
                debug!("subscription removed: id={}", id);
                Ok(())
            }
            None => Err(CoreError::SubscriptionNotFound(id)),
        }
    }

    /// Dispatch every queued event to its matching subscribers, highest
    /// priority first, oldest first among equals. Returns the number of
    /// events dispatched.
    ///
    /// Handlers run synchronously on the caller's stack. Events they publish
    /// are drained in this same call; there is no isolation between drain
    /// generations, so a handler that republishes unconditionally will
    /// starve the caller.
    pub fn drain(&self) -> usize {
        let mut dispatched = 0;

        loop {
            // Scoped borrow: the queue must be released before handlers run
            // so they can publish re-entrantly.
            let event = match self.queue.borrow_mut().pop_front() {
                Some(event) => event,
                None => break,
            };

            // Snapshot the matching handlers for this event; subscriptions
            // added or removed by a handler take effect from the next event.
            let handlers: Vec<Rc<dyn EventHandler>> = self
                .subscriptions
                .borrow()
                .iter()
                .filter(|sub| sub.filter.matches(event.kind))
                .map(|sub| Rc::clone(&sub.handler))
                .collect();

            for handler in handlers {
                handler.on_event(&event);
            }

            dispatched += 1;
        }

        dispatched
    }

    /// Number of events currently queued.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Drop every queued event without dispatching.
    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
    }

    /// Drop every queued event and every subscription.
    pub fn shutdown(&self) {
        self.clear();
        self.subscriptions.borrow_mut().clear();
        debug!("event bus shut down");
    }
}
