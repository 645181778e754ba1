//! Event types for the internal notification bus.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum length of an event's source name, in bytes. Longer names are
/// truncated at a character boundary when the event is published.
pub const MAX_SOURCE_LEN: usize = 64;

/// Domain events distributed through the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NetworkInterfaceUp,
    NetworkInterfaceDown,
    NetworkConnectionEstablished,
    NetworkConnectionLost,
    ConfigChanged,
    FirmwareUpdateStarted,
    FirmwareUpdateCompleted,
    FirmwareUpdateFailed,
    ServiceStarted,
    ServiceStopped,
    ServiceCrashed,
    SystemReboot,
    /// Host-defined events; the payload carries the meaning.
    Custom,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::NetworkInterfaceUp => "network_interface_up",
            EventKind::NetworkInterfaceDown => "network_interface_down",
            EventKind::NetworkConnectionEstablished => "network_connection_established",
            EventKind::NetworkConnectionLost => "network_connection_lost",
            EventKind::ConfigChanged => "config_changed",
            EventKind::FirmwareUpdateStarted => "firmware_update_started",
            EventKind::FirmwareUpdateCompleted => "firmware_update_completed",
            EventKind::FirmwareUpdateFailed => "firmware_update_failed",
            EventKind::ServiceStarted => "service_started",
            EventKind::ServiceStopped => "service_stopped",
            EventKind::ServiceCrashed => "service_crashed",
            EventKind::SystemReboot => "system_reboot",
            EventKind::Custom => "custom",
        }
    }
}

/// Dispatch priority. The queue is ordered by non-increasing priority;
/// events of equal priority are dispatched in publish order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPriority {
    Low,
    Normal,
    High,
    Critical,
}

/// A queued notification.
///
/// The payload is owned by each queued event independently; handlers receive
/// a shared reference valid only for the duration of the dispatch call and
/// copy whatever they need to keep.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub priority: EventPriority,
    /// Assigned by the bus at enqueue time. Any value set by the publisher
    /// is overwritten.
    pub timestamp: DateTime<Utc>,
    pub payload: Vec<u8>,
    pub source: String,
}

impl Event {
    pub fn new(
        kind: EventKind,
        priority: EventPriority,
        payload: Vec<u8>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            priority,
            timestamp: Utc::now(),
            payload,
            source: source.into(),
        }
    }
}

/// Truncate a source name to [`MAX_SOURCE_LEN`] bytes on a char boundary.
pub(crate) fn bound_source(source: &str) -> &str {
    if source.len() <= MAX_SOURCE_LEN {
        return source;
    }
    let mut end = MAX_SOURCE_LEN;
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    &source[..end]
}

/// Subscription filter: one specific event kind, or every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    /// Wildcard: matches every published event.
    Any,
    Kind(EventKind),
}

impl EventFilter {
    pub fn matches(&self, kind: EventKind) -> bool {
        match self {
            EventFilter::Any => true,
            EventFilter::Kind(k) => *k == kind,
        }
    }
}
