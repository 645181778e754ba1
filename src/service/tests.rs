use super::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[test]
fn test_callback_service_invokes_closures() {
    let starts = Rc::new(Cell::new(0u32));
    let stops = Rc::new(Cell::new(0u32));
    let (s, t) = (Rc::clone(&starts), Rc::clone(&stops));

    let mut service = CallbackService::new(
        move || {
            s.set(s.get() + 1);
            Ok(())
        },
        move || {
            t.set(t.get() + 1);
            Ok(())
        },
    );

    service.start().unwrap();
    service.start().unwrap();
    service.stop().unwrap();
    assert_eq!(starts.get(), 2);
    assert_eq!(stops.get(), 1);
}

#[test]
fn test_health_defaults_to_true() {
    let service = CallbackService::noop();
    assert!(service.health());
}

#[test]
fn test_with_health_probe() {
    let healthy = Rc::new(Cell::new(true));
    let probe = Rc::clone(&healthy);
    let service = CallbackService::noop().with_health(move || probe.get());

    assert!(service.health());
    healthy.set(false);
    assert!(!service.health());
}

#[test]
fn test_callback_errors_propagate() {
    let mut service = CallbackService::new(
        || Err(ServiceError::new("port already bound")),
        || Ok(()),
    );
    let err = service.start().unwrap_err();
    assert_eq!(err.to_string(), "port already bound");
}

#[test]
fn test_descriptor_builder() {
    let descriptor = ServiceDescriptor::new("api", CallbackService::noop())
        .with_dependencies(["storage", "net"])
        .with_restart(RestartConfig::bounded(Duration::from_millis(250), 5));

    assert_eq!(descriptor.name, "api");
    assert_eq!(descriptor.depends_on, vec!["storage", "net"]);
    assert!(descriptor.restart.auto_restart);
    assert_eq!(descriptor.restart.max_attempts, 5);
}

#[test]
fn test_descriptor_defaults() {
    let descriptor = ServiceDescriptor::new("plain", CallbackService::noop());
    assert!(descriptor.depends_on.is_empty());
    assert!(!descriptor.restart.auto_restart);
}
