//! Basic usage example for precedence-registry.
//!
//! Demonstrates:
//! - Unconditional `set` and conditional `set_if_absent`
//! - Resolving with `resolve()` (returns `Arc<S>`) and `resolve_tagged()`
//! - Lazy providers that run once
//! - The trace callback
//!
//! Run with: `cargo run --example basic_usage`

use precedence_registry::{Provider, Registry, RegistryApi, ServiceKey};
use std::sync::Arc;

pub trait SomeLibraryInterface: Send + Sync {
    fn describe(&self) -> String;
}

struct UserImpl;
struct DefaultImpl;

impl SomeLibraryInterface for UserImpl {
    fn describe(&self) -> String {
        "supplied by the application".to_string()
    }
}

impl SomeLibraryInterface for DefaultImpl {
    fn describe(&self) -> String {
        "library default".to_string()
    }
}

const SOME_LIBRARY_INTERFACE: ServiceKey<dyn SomeLibraryInterface> =
    ServiceKey::new("ISomeLibraryInterface");
const BANNER: ServiceKey<String> = ServiceKey::new("Banner");

fn main() {
    println!("=== precedence-registry: Basic Usage ===\n");

    let mut registry = Registry::new();
    registry.set_trace_callback(|event| println!("   [trace] {event}"));

    // -------------------------------------------------------------------------
    // 1. The application registers its implementation
    // -------------------------------------------------------------------------
    println!("1. Application registers UserImpl with set...");

    registry.set(
        &SOME_LIBRARY_INTERFACE,
        Provider::eager("UserImpl", Arc::new(UserImpl) as Arc<dyn SomeLibraryInterface>),
    );

    // -------------------------------------------------------------------------
    // 2. A library offers its default
    // -------------------------------------------------------------------------
    println!("\n2. Library offers DefaultImpl with set_if_absent...");

    let installed = registry.set_if_absent(
        &SOME_LIBRARY_INTERFACE,
        Provider::eager("DefaultImpl", Arc::new(DefaultImpl) as Arc<dyn SomeLibraryInterface>),
    );
    println!("   Default installed: {installed}");

    // -------------------------------------------------------------------------
    // 3. Lazy provider
    // -------------------------------------------------------------------------
    println!("\n3. Registering a lazy banner...");

    registry.set(
        &BANNER,
        Provider::lazy("Banner", || {
            println!("   (building banner)");
            Arc::new("Hello, World!".to_string())
        }),
    );

    // -------------------------------------------------------------------------
    // 4. Resolve
    // -------------------------------------------------------------------------
    println!("\n4. Resolving...");

    match registry.resolve_tagged(&SOME_LIBRARY_INTERFACE) {
        Ok((service, tag)) => println!("   {tag}: {}", service.describe()),
        Err(err) => println!("   {err}"),
    }

    for _ in 0..2 {
        match registry.resolve(&BANNER) {
            Ok(banner) => println!("   banner: {banner}"),
            Err(err) => println!("   {err}"),
        }
    }

    // -------------------------------------------------------------------------
    // 5. Missing keys
    // -------------------------------------------------------------------------
    println!("\n5. Resolving an unregistered key...");

    registry.clear();
    if let Err(err) = registry.resolve(&BANNER) {
        println!("   {err}");
    }

    println!("\n=== Done ===");
}
