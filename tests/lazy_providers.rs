//! Integration tests for lazy providers and memoization.

use precedence_registry::{Provider, Registry, RegistryApi, ServiceKey};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Connection {
    id: usize,
}

const CONNECTION: ServiceKey<Connection> = ServiceKey::new("IConnection");

fn counting_provider(calls: Arc<AtomicUsize>) -> Provider<Connection> {
    Provider::lazy("PooledConnection", move || {
        let id = calls.fetch_add(1, Ordering::SeqCst);
        Arc::new(Connection { id })
    })
}

#[test]
fn test_factory_runs_once_per_registry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = Registry::new();
    registry.set(&CONNECTION, counting_provider(calls.clone()));

    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let first = registry.resolve(&CONNECTION).unwrap();
    let second = registry.resolve(&CONNECTION).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.id, 0);
}

#[test]
fn test_materialized_after_first_resolution() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = Registry::new();
    assert_eq!(registry.is_materialized(&CONNECTION), None);

    registry.set(&CONNECTION, counting_provider(calls.clone()));
    assert_eq!(registry.is_materialized(&CONNECTION), Some(false));

    let _ = registry.resolve(&CONNECTION).unwrap();
    assert_eq!(registry.is_materialized(&CONNECTION), Some(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_eager_provider_is_materialized() {
    let mut registry = Registry::new();
    registry.set(&CONNECTION, Provider::value("UserConnection", Connection { id: 1 }));
    assert_eq!(registry.is_materialized(&CONNECTION), Some(true));
}

#[test]
fn test_each_registry_memoizes_separately() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut first = Registry::new();
    let mut second = Registry::new();
    first.set(&CONNECTION, counting_provider(calls.clone()));
    second.set(&CONNECTION, counting_provider(calls.clone()));

    let a = first.resolve(&CONNECTION).unwrap();
    let b = second.resolve(&CONNECTION).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_replacing_a_resolved_lazy_provider_starts_fresh() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = Registry::new();
    registry.set(&CONNECTION, counting_provider(calls.clone()));
    let before = registry.resolve(&CONNECTION).unwrap();

    registry.set(&CONNECTION, counting_provider(calls.clone()));
    let after = registry.resolve(&CONNECTION).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(!Arc::ptr_eq(&before, &after));
}

#[test]
fn test_rejected_lazy_default_never_runs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = Registry::new();
    registry.set(&CONNECTION, Provider::value("UserConnection", Connection { id: 99 }));

    assert!(!registry.set_if_absent(&CONNECTION, counting_provider(calls.clone())));
    assert_eq!(registry.resolve(&CONNECTION).unwrap().id, 99);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_lazy_provider_shared_across_threads() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = Registry::new();
    registry.set(&CONNECTION, counting_provider(calls.clone()));
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || registry.resolve(&CONNECTION).unwrap().id)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
