//! Route definitions and the route table.
//!
//! A [`Route`] is a flat navigation target addressed by `path` (required,
//! unique) and optionally by `name`. It carries free-form [`MetaMap`]
//! metadata (interpreted by the dispatcher, see
//! [`dispatcher`](crate::dispatcher)), default `props` for the rendered
//! destination, and an optional per-route `before_enter` guard.
//!
//! The [`RouteTable`] is fixed at router construction. There is no pattern
//! matching and no nesting: lookup is an exact comparison against `path`
//! first, then `name`, in table order.
//!
//! # Example
//!
//! ```
//! use stack_navigator::{Route, RouteTable};
//! use serde_json::json;
//!
//! let table = RouteTable::new(vec![
//!     Route::new("/home").name("home"),
//!     Route::new("/settings").meta("store", json!({ "loadSettings": true })),
//! ]);
//!
//! assert_eq!(table.get(&"home".into()).unwrap().path, "/home");
//! assert!(table.get(&"/missing".into()).is_none());
//! ```

use crate::guards::GuardCallback;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Ordered mapping of free-form keys to JSON values.
///
/// Used for route `meta`, `props`, and dispatcher payloads. Iteration
/// order is insertion order.
pub type MetaMap = serde_json::Map<String, Value>;

// ============================================================================
// Transition & RouteOptions
// ============================================================================

/// Screen-transition hint forwarded to the host.
///
/// The router performs no animation itself; this only travels through
/// [`RouteOptions`] to the host primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Duration in milliseconds.
    pub duration: u64,
}

impl Default for Transition {
    fn default() -> Self {
        Self { duration: 100 }
    }
}

/// Per-navigation options, merged over the router defaults.
///
/// `props` are caller-supplied values for the destination; they win over
/// the route's own `meta`/`props` when the effective props are resolved.
/// `context` is filled by the router with the resolved props before the
/// options reach the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteOptions {
    /// Transition hint for the host. `None` falls back to the router default.
    pub transition: Option<Transition>,

    /// Extra metadata for this navigation only.
    pub meta: MetaMap,

    /// Caller-supplied props for the destination.
    pub props: MetaMap,

    /// Resolved props as handed to the host. Filled by the router.
    pub context: MetaMap,

    /// Drop all history entries when this navigation commits.
    pub clear_history: bool,
}

impl RouteOptions {
    /// Options that clear history on commit.
    pub fn clearing_history() -> Self {
        Self {
            clear_history: true,
            ..Self::default()
        }
    }
}

// ============================================================================
// Route
// ============================================================================

/// A navigation target in the route table.
///
/// Built fluently and registered once; entries are shared as `Arc<Route>`
/// and never mutated afterwards. Per-navigation props are resolved into a
/// scratch structure, not written back here.
///
/// # Example
///
/// ```
/// use stack_navigator::{Route, GuardCallback, GuardOutcome};
///
/// let route = Route::new("/account")
///     .name("account")
///     .before_enter(GuardCallback::sync(|_to, _from| GuardOutcome::Allow));
/// assert_eq!(route.lookup_key(), "account");
/// ```
#[derive(Debug, Default)]
pub struct Route {
    /// Unique path identifying the route.
    pub path: String,

    /// Optional unique name, preferred over `path` when resolving a
    /// [`RouteTarget::Route`] handle.
    pub name: Option<String>,

    /// Free-form metadata. A `store` object inside is consumed by the
    /// meta dispatcher.
    pub meta: MetaMap,

    /// Default props for the destination.
    pub props: MetaMap,

    /// Guard run when the destination screen is about to become active,
    /// before the beforeResolve phase.
    pub before_enter: Option<GuardCallback>,
}

impl Route {
    /// Create a route for the given path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the route name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Insert one metadata entry.
    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// Insert one default prop.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    /// Attach a guard run when the destination is about to become active.
    #[must_use]
    pub fn before_enter(mut self, guard: GuardCallback) -> Self {
        self.before_enter = Some(guard);
        self
    }

    /// The identifier used when this route is passed back in as a target:
    /// the name when present, the path otherwise.
    pub fn lookup_key(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

// ============================================================================
// RouteTarget
// ============================================================================

/// What a caller (or a redirecting guard) points the router at.
///
/// A bare string is a path or a name; a [`Route`] handle resolves through
/// its [`lookup_key`](Route::lookup_key).
#[derive(Debug, Clone)]
pub enum RouteTarget {
    /// Path or name to look up in the table.
    Ident(String),
    /// An explicit route handle.
    Route(Arc<Route>),
}

impl RouteTarget {
    /// The identifier this target resolves through.
    pub fn ident(&self) -> &str {
        match self {
            RouteTarget::Ident(ident) => ident,
            RouteTarget::Route(route) => route.lookup_key(),
        }
    }
}

impl PartialEq for RouteTarget {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RouteTarget::Ident(a), RouteTarget::Ident(b)) => a == b,
            (RouteTarget::Route(a), RouteTarget::Route(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}

impl From<&str> for RouteTarget {
    fn from(ident: &str) -> Self {
        RouteTarget::Ident(ident.to_string())
    }
}

impl From<String> for RouteTarget {
    fn from(ident: String) -> Self {
        RouteTarget::Ident(ident)
    }
}

impl From<Arc<Route>> for RouteTarget {
    fn from(route: Arc<Route>) -> Self {
        RouteTarget::Route(route)
    }
}

// ============================================================================
// RouteTable
// ============================================================================

/// The fixed, ordered set of routes known to a router.
///
/// Lookup is O(n) over the table; route tables are expected to hold tens
/// of entries.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
}

impl RouteTable {
    /// Build a table from routes in registration order.
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes: routes.into_iter().map(Arc::new).collect(),
        }
    }

    /// Resolve a target to a table entry.
    ///
    /// Scans for an exact `path` match first, then for a `name` match,
    /// each in table order. An empty identifier resolves to `None`.
    pub fn get(&self, target: &RouteTarget) -> Option<Arc<Route>> {
        let ident = target.ident();
        if ident.is_empty() {
            return None;
        }

        self.routes
            .iter()
            .find(|route| route.path == ident)
            .or_else(|| {
                self.routes
                    .iter()
                    .find(|route| route.name.as_deref() == Some(ident))
            })
            .cloned()
    }

    /// Whether a target resolves to a table entry.
    pub fn contains(&self, target: &RouteTarget) -> bool {
        self.get(target).is_some()
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over the table in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.iter()
    }
}
