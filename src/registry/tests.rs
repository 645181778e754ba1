use super::*;
use crate::service::CallbackService;
use crate::state::LifecycleState;

fn descriptor(name: &str) -> ServiceDescriptor {
    ServiceDescriptor::new(name, CallbackService::noop())
}

#[test]
fn test_insert_starts_stopped_with_zero_counters() {
    let mut registry = Registry::with_capacity(4);
    registry.insert(descriptor("net")).unwrap();

    let entry = registry.get("net").unwrap();
    assert_eq!(entry.runtime.state, LifecycleState::Stopped);
    assert_eq!(entry.runtime.restart_count, 0);
    assert!(entry.runtime.started_at.is_none());
}

#[test]
fn test_duplicate_name_rejected() {
    let mut registry = Registry::with_capacity(4);
    registry.insert(descriptor("net")).unwrap();
    let result = registry.insert(descriptor("net"));
    assert!(matches!(result, Err(CoreError::DuplicateService(name)) if name == "net"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_capacity_enforced() {
    let mut registry = Registry::with_capacity(2);
    registry.insert(descriptor("a")).unwrap();
    registry.insert(descriptor("b")).unwrap();
    assert!(matches!(
        registry.insert(descriptor("c")),
        Err(CoreError::RegistryFull(2))
    ));
}

#[test]
fn test_names_in_registration_order() {
    let mut registry = Registry::with_capacity(8);
    for name in ["zeta", "alpha", "mid"] {
        registry.insert(descriptor(name)).unwrap();
    }
    assert_eq!(registry.names(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_remove_preserves_relative_order() {
    let mut registry = Registry::with_capacity(8);
    for name in ["a", "b", "c", "d"] {
        registry.insert(descriptor(name)).unwrap();
    }
    registry.remove("b").unwrap();
    assert_eq!(registry.names(), vec!["a", "c", "d"]);
    assert!(!registry.contains("b"));
}

#[test]
fn test_remove_unknown_fails() {
    let mut registry = Registry::with_capacity(4);
    assert!(matches!(
        registry.remove("ghost"),
        Err(CoreError::ServiceNotFound(name)) if name == "ghost"
    ));
}

#[test]
fn test_reinsert_after_remove_is_allowed() {
    let mut registry = Registry::with_capacity(2);
    registry.insert(descriptor("a")).unwrap();
    registry.remove("a").unwrap();
    registry.insert(descriptor("a")).unwrap();
    assert_eq!(registry.names(), vec!["a"]);
}

#[test]
fn test_clear() {
    let mut registry = Registry::with_capacity(4);
    registry.insert(descriptor("a")).unwrap();
    registry.insert(descriptor("b")).unwrap();
    registry.clear();
    assert!(registry.is_empty());
    assert!(registry.names().is_empty());
}
