//! The three guard phases of one navigation.
//!
//! [`GuardPhases`] owns three independent [`GuardSet`]s:
//!
//! - `before_each` — runs before anything else, may veto or redirect;
//! - `before_resolve` — runs when the destination screen is about to
//!   become active, may still veto or redirect;
//! - `after_each` — hook mode, runs once the destination is active,
//!   notification only.
//!
//! All three share the `(to, from)` pair of the navigation in flight but
//! fire at different points of the host lifecycle, so each keeps its own
//! cancellation state. [`set_routes`](GuardPhases::set_routes) retargets
//! them atomically at the start of every navigation.

use crate::guards::{GuardCallback, GuardSet};
use crate::lifecycle::GuardOutcome;
use crate::route::Route;
use std::sync::Arc;

/// Registry of the beforeEach / beforeResolve / afterEach guard sets.
#[derive(Debug)]
pub struct GuardPhases {
    before_each: GuardSet,
    before_resolve: GuardSet,
    after_each: GuardSet,
}

impl GuardPhases {
    /// Create the three empty phase sets.
    pub fn new() -> Self {
        Self {
            before_each: GuardSet::new(false),
            before_resolve: GuardSet::new(false),
            after_each: GuardSet::new(true),
        }
    }

    /// Append a callback to the beforeEach phase.
    pub fn add_before_each(&mut self, callback: GuardCallback) {
        self.before_each.add(callback);
    }

    /// Append a callback to the beforeResolve phase.
    pub fn add_before_resolve(&mut self, callback: GuardCallback) {
        self.before_resolve.add(callback);
    }

    /// Append a hook to the afterEach phase.
    pub fn add_after_each(&mut self, callback: GuardCallback) {
        self.after_each.add(callback);
    }

    /// Run the beforeEach phase.
    pub async fn run_before_each(&mut self) -> GuardOutcome {
        self.before_each.run().await
    }

    /// Run the beforeResolve phase.
    pub async fn run_before_resolve(&mut self) -> GuardOutcome {
        self.before_resolve.run().await
    }

    /// Run the afterEach hooks. Their outcomes carry no veto power.
    pub async fn run_after_each(&mut self) {
        let _ = self.after_each.run().await;
    }

    /// Retarget all three phases to the navigation in flight.
    pub fn set_routes(&mut self, to: Arc<Route>, from: Option<Arc<Route>>) {
        self.before_each.set_routes(Arc::clone(&to), from.clone());
        self.before_resolve.set_routes(Arc::clone(&to), from.clone());
        self.after_each.set_routes(to, from);
    }
}

impl Default for GuardPhases {
    fn default() -> Self {
        Self::new()
    }
}
