//! Bounded catalog of registered services.
//!
//! Lookup is name-keyed for O(1) access; a separate order list preserves
//! registration order, which `list`, `start_all`, `stop_all`, and the
//! supervisor tick all iterate in.

use std::collections::HashMap;

use crate::errors::{CoreError, Result};
use crate::service::ServiceDescriptor;
use crate::state::ServiceRuntime;

/// A registered service: its static descriptor plus the runtime record the
/// manager mutates.
pub struct ServiceEntry {
    pub descriptor: ServiceDescriptor,
    pub runtime: ServiceRuntime,
}

pub struct Registry {
    capacity: usize,
    entries: HashMap<String, ServiceEntry>,
    /// Registration order; kept in lockstep with `entries`.
    order: Vec<String>,
}

impl Registry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert a new service in `Stopped` state with zero restart counters.
    pub fn insert(&mut self, descriptor: ServiceDescriptor) -> Result<()> {
        if self.entries.contains_key(&descriptor.name) {
            return Err(CoreError::DuplicateService(descriptor.name.clone()));
        }
        if self.entries.len() >= self.capacity {
            return Err(CoreError::RegistryFull(self.capacity));
        }

        let name = descriptor.name.clone();
        self.order.push(name.clone());
        self.entries.insert(
            name,
            ServiceEntry {
                descriptor,
                runtime: ServiceRuntime::default(),
            },
        );
        Ok(())
    }

    /// Remove a service, preserving the relative order of the rest.
    pub fn remove(&mut self, name: &str) -> Result<ServiceEntry> {
        match self.entries.remove(name) {
            Some(entry) => {
                self.order.retain(|n| n != name);
                Ok(entry)
            }
            None => Err(CoreError::ServiceNotFound(name.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ServiceEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ServiceEntry> {
        self.entries.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests;
