//! Store dispatch driven by route metadata.
//!
//! Routes can carry a `store` object in their `meta`:
//!
//! ```text
//! Route::new("/b").meta("store", json!({ "setFlag": true }))
//! ```
//!
//! When such a route resolves, every key of the object is dispatched as a
//! store action with the corresponding value as payload, in the object's
//! insertion order. The store itself is opaque to the router: anything
//! implementing [`StoreDispatch`] works, and dispatch is a pure side
//! effect with no feedback into navigation.

use crate::guards::GuardCallback;
use crate::lifecycle::GuardOutcome;
use crate::route::MetaMap;
use crate::router::Router;
use crate::router_error;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The host application's action-dispatch primitive.
pub trait StoreDispatch: Send + Sync {
    /// Dispatch one action with its payload.
    fn dispatch(&self, action: &str, payload: &Value);
}

/// Maps route metadata onto store actions.
pub struct MetaDispatcher {
    store: Option<Arc<dyn StoreDispatch>>,
}

impl MetaDispatcher {
    /// Dispatcher bound to a store.
    pub fn new(store: Arc<dyn StoreDispatch>) -> Self {
        Self { store: Some(store) }
    }

    /// Dispatcher with no store; every dispatch attempt reports failure.
    pub fn detached() -> Self {
        Self { store: None }
    }

    /// Dispatch every entry of `meta` as an action, in insertion order.
    ///
    /// Returns `false` without dispatching anything when the mapping or
    /// the store handle is absent.
    pub fn dispatch_from_meta(&self, meta: Option<&MetaMap>) -> bool {
        let Some(meta) = meta else {
            return false;
        };
        let Some(store) = &self.store else {
            router_error!("meta dispatch skipped: store not found");
            return false;
        };

        for (action, payload) in meta {
            store.dispatch(action, payload);
        }

        true
    }
}

impl fmt::Debug for MetaDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaDispatcher")
            .field("store", &self.store.is_some())
            .finish()
    }
}

/// Wire a [`MetaDispatcher`] into a router.
///
/// Installs a beforeResolve guard that feeds the resolved route's
/// `meta.store` object into the dispatcher. Routes without one are left
/// alone.
pub fn register_action_dispatcher(router: &mut Router, store: Arc<dyn StoreDispatch>) {
    let dispatcher = MetaDispatcher::new(store);

    router.add_before_resolve(GuardCallback::sync(move |to, _from| {
        if let Some(Value::Object(store_meta)) = to.meta.get("store") {
            dispatcher.dispatch_from_meta(Some(store_meta));
        }
        GuardOutcome::Allow
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        actions: Mutex<Vec<(String, Value)>>,
    }

    impl StoreDispatch for RecordingStore {
        fn dispatch(&self, action: &str, payload: &Value) {
            self.actions
                .lock()
                .unwrap()
                .push((action.to_string(), payload.clone()));
        }
    }

    #[test]
    fn test_dispatches_every_key_in_insertion_order() {
        let store = Arc::new(RecordingStore::default());
        let dispatcher = MetaDispatcher::new(store.clone());

        let mut meta = MetaMap::new();
        meta.insert("setUser".to_string(), json!({ "id": 7 }));
        meta.insert("setFlag".to_string(), json!(true));

        assert!(dispatcher.dispatch_from_meta(Some(&meta)));
        assert_eq!(
            *store.actions.lock().unwrap(),
            vec![
                ("setUser".to_string(), json!({ "id": 7 })),
                ("setFlag".to_string(), json!(true)),
            ]
        );
    }

    #[test]
    fn test_absent_meta_returns_false() {
        let store = Arc::new(RecordingStore::default());
        let dispatcher = MetaDispatcher::new(store.clone());

        assert!(!dispatcher.dispatch_from_meta(None));
        assert!(store.actions.lock().unwrap().is_empty());
    }

    #[test]
    fn test_detached_dispatcher_returns_false() {
        let dispatcher = MetaDispatcher::detached();
        let meta = MetaMap::new();
        assert!(!dispatcher.dispatch_from_meta(Some(&meta)));
    }
}
