//! Navigation state and phase machine.
//!
//! One navigation moves through three phases:
//!
//! ```text
//! Idle -> Resolving -> Transitioning -> Idle
//!            |  \
//!            |   `-- redirect: Resolving again, new target
//!            `----- deny/fail: Idle
//! ```
//!
//! `Resolving` covers the beforeEach phase; `Transitioning` lasts from the
//! host screen-transition call until the host reports the destination
//! active (afterEach). The pending route is `Some` exactly while the
//! phase is not `Idle`.
//!
//! The history stack holds the paths of previously active routes, never
//! the active one: a forward commit appends the route navigated away
//! from, a backward commit pops one entry.

use crate::route::Route;
use std::sync::Arc;

/// Where the router is inside the navigation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    /// No navigation in flight.
    Idle,
    /// beforeEach guards are running.
    Resolving,
    /// The host is performing the screen transition.
    Transitioning,
}

/// Current route, pending route, phase, and history of a router.
#[derive(Debug)]
pub struct NavigationState {
    current: Option<Arc<Route>>,
    pending: Option<Arc<Route>>,
    phase: NavigationPhase,
    history: Vec<String>,
}

impl NavigationState {
    /// Fresh state: no current route, idle, empty history.
    pub fn new() -> Self {
        Self {
            current: None,
            pending: None,
            phase: NavigationPhase::Idle,
            history: Vec::new(),
        }
    }

    /// The phase the router is in.
    pub fn phase(&self) -> NavigationPhase {
        self.phase
    }

    /// Whether a navigation is in flight.
    pub fn is_navigating(&self) -> bool {
        self.phase != NavigationPhase::Idle
    }

    /// The route believed active.
    pub fn current(&self) -> Option<&Arc<Route>> {
        self.current.as_ref()
    }

    /// The target of the navigation in flight.
    pub fn pending(&self) -> Option<&Arc<Route>> {
        self.pending.as_ref()
    }

    /// Previously visited route paths, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Whether a backward navigation has somewhere to go.
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// The path a backward navigation would target, without navigating.
    pub fn peek_back_path(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub(crate) fn begin(&mut self, pending: Arc<Route>) {
        self.phase = NavigationPhase::Resolving;
        self.pending = Some(pending);
    }

    pub(crate) fn transition(&mut self) {
        self.phase = NavigationPhase::Transitioning;
    }

    pub(crate) fn finish(&mut self) {
        self.phase = NavigationPhase::Idle;
        self.pending = None;
    }

    pub(crate) fn set_current(&mut self, route: Arc<Route>) {
        self.current = Some(route);
    }

    pub(crate) fn append_history(&mut self, path: String) {
        self.history.push(path);
    }

    pub(crate) fn pop_history(&mut self) -> Option<String> {
        self.history.pop()
    }

    pub(crate) fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
