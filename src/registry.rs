//! Explicit registry of router instances.
//!
//! Applications that drive several independent view stacks (a main frame
//! and a modal frame, say) keep one [`Router`] per stack. The registry is
//! an owned object created at bootstrap, not module-level state, so tests
//! can construct as many isolated registries as they need.
//!
//! Routers are registered once and handed out as [`SharedRouter`] handles,
//! addressable by registration index or by name.

use crate::router::Router;
use crate::router_warn;
use std::sync::{Arc, Mutex};

/// Shared handle to a registered router.
pub type SharedRouter = Arc<Mutex<Router>>;

/// Owned collection of named routers.
#[derive(Default)]
pub struct RouterRegistry {
    entries: Vec<(String, SharedRouter)>,
}

impl RouterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a router under a name and return its index.
    ///
    /// Names are expected to be unique; a duplicate is registered anyway
    /// (lookups by that name keep resolving to the first entry) and
    /// logged.
    pub fn register(&mut self, name: impl Into<String>, router: Router) -> usize {
        let name = name.into();
        if self.entries.iter().any(|(existing, _)| *existing == name) {
            router_warn!("router '{}' registered more than once", name);
        }
        self.entries.push((name, Arc::new(Mutex::new(router))));
        self.entries.len() - 1
    }

    /// Look up a router by registration index.
    pub fn get(&self, index: usize) -> Option<SharedRouter> {
        self.entries.get(index).map(|(_, router)| Arc::clone(router))
    }

    /// Look up a router by name.
    pub fn get_by_name(&self, name: &str) -> Option<SharedRouter> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, router)| Arc::clone(router))
    }

    /// Number of registered routers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;

    fn sample_router() -> Router {
        Router::builder().route(Route::new("/")).build()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = RouterRegistry::new();
        let main = registry.register("main", sample_router());
        let modal = registry.register("modal", sample_router());

        assert_eq!(main, 0);
        assert_eq!(modal, 1);
        assert_eq!(registry.len(), 2);
        assert!(registry.get(main).is_some());
        assert!(registry.get_by_name("modal").is_some());
        assert!(registry.get(7).is_none());
        assert!(registry.get_by_name("other").is_none());
    }

    #[test]
    fn test_registries_are_isolated() {
        let mut first = RouterRegistry::new();
        first.register("main", sample_router());

        let second = RouterRegistry::new();
        assert!(second.is_empty());
        assert!(second.get_by_name("main").is_none());
    }

    #[test]
    fn test_duplicate_name_resolves_to_first() {
        let mut registry = RouterRegistry::new();
        let first = registry.register("main", sample_router());
        registry.register("main", sample_router());

        let by_name = registry.get_by_name("main").unwrap();
        let by_index = registry.get(first).unwrap();
        assert!(Arc::ptr_eq(&by_name, &by_index));
    }
}
