//! Service registration types for cross-crate discovery
//!
//! Feature crates (entitlements, activity-log) publish their default
//! services through the `inventory` crate using the factory-return pattern:
//! each crate submits a [`ServiceFactory`] whose function builds the crate's
//! services as [`ServiceEntry`] items, and the application shell collects
//! every entry at startup with [`collect_all_services`].
//!
//! These types live here rather than in an assembly crate so that feature
//! crates never depend on each other just to register themselves.

use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::{debug, info};

/// A type-erased service instance published by a feature crate.
pub struct ServiceEntry {
    /// The `TypeId` of the concrete service, used as the registration key.
    pub type_id: TypeId,

    /// Human-readable type name for diagnostics.
    pub type_name: &'static str,

    /// The service instance.
    pub instance: Arc<dyn Any + Send + Sync>,
}

impl ServiceEntry {
    /// Create an entry for a concrete service type.
    pub fn new<T: Send + Sync + 'static>(instance: Arc<T>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            instance: instance as Arc<dyn Any + Send + Sync>,
        }
    }
}

impl std::fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("type_id", &self.type_id)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// A named factory that produces a crate's services.
///
/// Submitted once per feature crate via `inventory::submit!`. The factory
/// function runs during container assembly, in priority order.
pub struct ServiceFactory {
    /// Name of the service group (e.g. "entitlements", "activity-log").
    pub name: &'static str,

    /// Factory function that creates and returns the group's services.
    pub factory_fn: fn() -> Vec<ServiceEntry>,

    /// Registration order (lower = earlier, default = 100).
    pub priority: u32,
}

impl ServiceFactory {
    /// Create a factory with the default priority.
    pub const fn new(name: &'static str, factory_fn: fn() -> Vec<ServiceEntry>) -> Self {
        Self {
            name,
            factory_fn,
            priority: 100,
        }
    }

    /// Create a factory with an explicit priority.
    pub const fn with_priority(
        name: &'static str,
        factory_fn: fn() -> Vec<ServiceEntry>,
        priority: u32,
    ) -> Self {
        Self {
            name,
            factory_fn,
            priority,
        }
    }
}

inventory::collect!(ServiceFactory);

/// Run every discovered factory and collect the produced services.
///
/// Factories execute in priority order (stable for equal priorities), so a
/// group that another group reads during construction can register earlier.
pub fn collect_all_services() -> Vec<ServiceEntry> {
    let mut factories: Vec<&ServiceFactory> = inventory::iter::<ServiceFactory>().collect();
    factories.sort_by_key(|f| f.priority);

    info!(
        "discovered {} service factories via inventory",
        factories.len()
    );

    let mut all_services = Vec::new();
    for factory in factories {
        let services = (factory.factory_fn)();
        debug!(
            "factory '{}' produced {} services (priority {})",
            factory.name,
            services.len(),
            factory.priority
        );
        all_services.extend(services);
    }

    all_services
}

/// Names of every discovered factory, in priority order.
pub fn list_discovered_factories() -> Vec<&'static str> {
    let mut factories: Vec<&ServiceFactory> = inventory::iter::<ServiceFactory>().collect();
    factories.sort_by_key(|f| f.priority);
    factories.iter().map(|f| f.name).collect()
}
