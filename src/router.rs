//! The navigation controller.
//!
//! [`Router`] is the single source of truth for "where are we, where are
//! we going, is it safe to proceed". It owns the route table, the
//! [`NavigationState`], and the [`GuardPhases`], and drives them through
//! the navigation pipeline:
//!
//! 1. resolve the target against the table (unknown target: warn, no-op);
//! 2. run the beforeEach phase and apply its outcome (deny / fail /
//!    redirect / allow);
//! 3. notify a pending modal handle, hand the transition to the
//!    [`ViewHost`], and commit the current route and history;
//! 4. wait for the host to report back: `invoke_before_resolve` runs the
//!    destination's `before_enter` guard and the beforeResolve phase,
//!    `invoke_after_each` runs the afterEach hooks and returns the router
//!    to idle.
//!
//! Nothing is thrown across `push`/`back`: failures surface through the
//! log and the [`on_error`](Router::on_error) channel only.
//!
//! A redirect restarts the whole pipeline against the new target. Chains
//! are bounded; at [`MAX_REDIRECT_DEPTH`] hops the navigation fails with
//! [`NavigationError::RedirectLoop`]. Only one navigation may be in
//! flight: requests made while another is resolving or transitioning are
//! rejected with a warning.
//!
//! # Example
//!
//! ```no_run
//! use stack_navigator::{GuardCallback, GuardOutcome, Route, RouteOptions, Router};
//!
//! # async fn demo() {
//! let mut router = Router::builder()
//!     .route(Route::new("/home").name("home"))
//!     .route(Route::new("/login"))
//!     .build();
//!
//! router.add_before_each(GuardCallback::sync(|to, _from| {
//!     if to.path == "/home" {
//!         GuardOutcome::redirect("/login")
//!     } else {
//!         GuardOutcome::Allow
//!     }
//! }));
//!
//! router.push("home", RouteOptions::default()).await;
//! # }
//! ```

use crate::error::{ErrorCallback, NavigationError};
use crate::guards::{GuardCallback, GuardSet};
use crate::host::{ModalHandle, RouteBackCallback, RouteToCallback, ViewHost};
use crate::lifecycle::GuardOutcome;
use crate::phases::GuardPhases;
use crate::route::{MetaMap, Route, RouteOptions, RouteTable, RouteTarget, Transition};
use crate::state::{NavigationPhase, NavigationState};
use crate::{router_debug, router_error, router_info, router_warn};
use serde_json::Value;
use std::sync::Arc;

/// Maximum redirect hops within one logical navigation.
pub const MAX_REDIRECT_DEPTH: usize = 5;

/// What the controller does with a resolved guard outcome.
enum Applied {
    Proceed,
    Halt,
    Redirect(RouteTarget),
}

// ============================================================================
// RouterBuilder
// ============================================================================

/// Fluent construction of a [`Router`].
///
/// The route table is fixed once [`build`](Self::build) is called. A
/// router built without a [`host`](Self::host) is headless: transitions
/// are no-ops and the back-stack reads as absent, which is convenient for
/// exercising guard logic in tests.
#[must_use]
pub struct RouterBuilder {
    routes: Vec<Route>,
    host: Option<Arc<dyn ViewHost>>,
    route_to_callback: Option<RouteToCallback>,
    route_back_callback: Option<RouteBackCallback>,
    back_fallback_path: Option<String>,
    default_transition: Transition,
}

impl RouterBuilder {
    fn new() -> Self {
        Self {
            routes: Vec::new(),
            host: None,
            route_to_callback: None,
            route_back_callback: None,
            back_fallback_path: None,
            default_transition: Transition::default(),
        }
    }

    /// Add one route to the table.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Add several routes to the table, in order.
    pub fn routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Set the host performing the actual screen transitions.
    pub fn host<H: ViewHost + 'static>(mut self, host: H) -> Self {
        self.host = Some(Arc::new(host));
        self
    }

    /// Callback fired right before every forward transition.
    pub fn route_to_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Arc<Route>, &RouteOptions) + Send + Sync + 'static,
    {
        self.route_to_callback = Some(Arc::new(callback));
        self
    }

    /// Callback fired right before every backward transition.
    pub fn route_back_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Arc<Route>, &RouteOptions) + Send + Sync + 'static,
    {
        self.route_back_callback = Some(Arc::new(callback));
        self
    }

    /// Router-wide fallback for backward navigation with empty history.
    pub fn back_fallback_path(mut self, path: impl Into<String>) -> Self {
        self.back_fallback_path = Some(path.into());
        self
    }

    /// Transition applied when a navigation specifies none.
    pub fn default_transition(mut self, transition: Transition) -> Self {
        self.default_transition = transition;
        self
    }

    /// Build the router.
    pub fn build(self) -> Router {
        Router {
            table: RouteTable::new(self.routes),
            state: NavigationState::new(),
            phases: GuardPhases::new(),
            host: self.host.unwrap_or_else(|| Arc::new(HeadlessHost)),
            route_to_callback: self.route_to_callback,
            route_back_callback: self.route_back_callback,
            back_fallback_path: self.back_fallback_path,
            default_transition: self.default_transition,
            error_callbacks: Vec::new(),
            modal: None,
        }
    }
}

/// Host used when none is configured; every transition is a no-op.
struct HeadlessHost;

impl ViewHost for HeadlessHost {
    fn navigate_forward(&self, _route: &Arc<Route>, _options: &RouteOptions) {}

    fn navigate_backward(&self, _options: &RouteOptions) {}

    fn back_stack_len(&self) -> Option<usize> {
        None
    }
}

// ============================================================================
// Router
// ============================================================================

/// Client-side navigation controller over a host view stack.
pub struct Router {
    table: RouteTable,
    state: NavigationState,
    phases: GuardPhases,
    host: Arc<dyn ViewHost>,
    route_to_callback: Option<RouteToCallback>,
    route_back_callback: Option<RouteBackCallback>,
    back_fallback_path: Option<String>,
    default_transition: Transition,
    error_callbacks: Vec<ErrorCallback>,
    modal: Option<ModalHandle>,
}

impl Router {
    /// Start building a router.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Append a callback to the beforeEach guard phase.
    pub fn add_before_each(&mut self, callback: GuardCallback) {
        self.phases.add_before_each(callback);
    }

    /// Append a callback to the beforeResolve guard phase.
    pub fn add_before_resolve(&mut self, callback: GuardCallback) {
        self.phases.add_before_resolve(callback);
    }

    /// Append a hook to the afterEach phase.
    pub fn add_after_each(&mut self, callback: GuardCallback) {
        self.phases.add_after_each(callback);
    }

    /// Register a sink for navigation failures.
    pub fn on_error<F>(&mut self, callback: F)
    where
        F: Fn(&NavigationError) + Send + Sync + 'static,
    {
        self.error_callbacks.push(Arc::new(callback));
    }

    /// Register the owning view of a currently presented modal.
    ///
    /// The handle is notified once, by the next navigation that passes its
    /// beforeEach phase, then dropped.
    pub fn set_modal_handle(&mut self, handle: ModalHandle) {
        self.modal = Some(handle);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Resolve a target against the route table.
    pub fn get_route(&self, target: impl Into<RouteTarget>) -> Option<Arc<Route>> {
        self.table.get(&target.into())
    }

    /// The route believed active.
    pub fn current_route(&self) -> Option<Arc<Route>> {
        self.state.current().cloned()
    }

    /// The target of the navigation in flight, if any.
    pub fn new_route(&self) -> Option<Arc<Route>> {
        self.state.pending().cloned()
    }

    /// The route a backward navigation would target.
    pub fn previous_route(&self) -> Option<Arc<Route>> {
        self.state
            .peek_back_path()
            .and_then(|path| self.table.get(&RouteTarget::from(path)))
    }

    /// Previously visited route paths, oldest first.
    pub fn history(&self) -> &[String] {
        self.state.history()
    }

    /// Whether a navigation is in flight.
    pub fn is_navigating(&self) -> bool {
        self.state.is_navigating()
    }

    /// Where the router is inside the navigation lifecycle.
    pub fn phase(&self) -> NavigationPhase {
        self.state.phase()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate forward to a route by path, name, or handle.
    pub async fn push(&mut self, target: impl Into<RouteTarget>, options: RouteOptions) {
        self.navigate(target.into(), options, false).await;
    }

    /// Navigate back through history.
    ///
    /// Falls back to `fallback` (or the router-wide fallback path) as a
    /// forward, history-clearing navigation when there is no history entry
    /// or the host back-stack is exhausted; with no fallback configured
    /// this logs a warning and does nothing.
    pub async fn back(&mut self, options: RouteOptions, fallback: Option<&str>) {
        if self.state.is_navigating() {
            router_warn!("back navigation rejected: another navigation is in flight");
            return;
        }

        let back_stack_empty = matches!(self.host.back_stack_len(), Some(0));
        let target = match self.previous_route() {
            Some(route) if !back_stack_empty => route,
            _ => {
                let fallback_path = fallback
                    .map(str::to_string)
                    .or_else(|| self.back_fallback_path.clone());
                match fallback_path {
                    Some(path) => {
                        let mut options = options;
                        options.clear_history = true;
                        self.navigate(RouteTarget::from(path), options, false).await;
                    }
                    None => {
                        router_warn!("No route to go back to");
                    }
                }
                return;
            }
        };

        self.navigate(RouteTarget::Route(target), options, true).await;
    }

    /// Core pipeline. Redirects loop back here with a fresh target,
    /// default options, and the forward direction.
    async fn navigate(&mut self, target: RouteTarget, options: RouteOptions, backwards: bool) {
        if self.state.is_navigating() {
            router_warn!(
                "navigation to '{}' rejected: another navigation is in flight",
                target
            );
            return;
        }

        let mut target = target;
        let mut options = options;
        let mut backwards = backwards;
        let mut hops = 0usize;

        loop {
            let Some(new_route) = self.table.get(&target) else {
                router_warn!("Route {} is missing", target);
                self.state.finish();
                return;
            };

            if hops >= MAX_REDIRECT_DEPTH {
                let error = NavigationError::RedirectLoop {
                    path: new_route.path.clone(),
                };
                self.report_error(&error);
                self.state.finish();
                return;
            }

            let previous = self.state.current().cloned();
            let effective = self.effective_options(&new_route, options.clone());

            self.state.begin(Arc::clone(&new_route));
            self.phases
                .set_routes(Arc::clone(&new_route), previous.clone());

            router_debug!(
                "beforeEach: '{}' -> '{}'",
                previous.as_ref().map_or("<none>", |r| r.path.as_str()),
                new_route.path
            );
            let outcome = self.phases.run_before_each().await;
            match self.apply_outcome(outcome) {
                Applied::Proceed => {}
                Applied::Halt => {
                    self.state.finish();
                    return;
                }
                Applied::Redirect(next_target) => {
                    router_debug!(
                        "beforeEach redirected '{}' -> '{}'",
                        new_route.path,
                        next_target
                    );
                    self.state.finish();
                    target = next_target;
                    options = RouteOptions::default();
                    backwards = false;
                    hops += 1;
                    continue;
                }
            }

            // Navigation is confirmed. A modal's owning view gets its
            // navigating-from notification before the screen moves.
            if let Some(modal) = self.modal.take() {
                modal.notify_navigating_from();
            }

            self.state.transition();

            if backwards {
                if let Some(callback) = &self.route_back_callback {
                    callback(&new_route, &effective);
                }
                self.host.navigate_backward(&effective);
            } else {
                if let Some(callback) = &self.route_to_callback {
                    callback(&new_route, &effective);
                }
                self.host.navigate_forward(&new_route, &effective);
            }

            self.state.set_current(Arc::clone(&new_route));

            if effective.clear_history {
                self.state.clear_history();
            } else if backwards {
                self.state.pop_history();
            } else if let Some(previous) = previous {
                // Re-pushing the active route must not leave its own path
                // in history.
                if previous.path != new_route.path {
                    self.state.append_history(previous.path.clone());
                }
            }

            router_info!("navigated to '{}'", new_route.path);
            return;
        }
    }

    // ========================================================================
    // Host lifecycle notifications
    // ========================================================================

    /// To be called by the host binding when the destination screen is
    /// about to become active.
    ///
    /// Runs the destination's own `before_enter` guard, then the
    /// beforeResolve phase. Returns `false` when either vetoed the
    /// navigation; a redirect outcome starts a fresh navigation against
    /// the new target and also returns `false`.
    pub async fn invoke_before_resolve(&mut self) -> bool {
        let Some(pending) = self.state.pending().cloned() else {
            router_warn!("beforeResolve invoked with no navigation in flight");
            return true;
        };

        if let Some(guard) = pending.before_enter.clone() {
            let mut entry = GuardSet::new(false);
            entry.add(guard);
            entry.set_routes(Arc::clone(&pending), self.previous_route());
            let outcome = entry.run().await;
            match self.apply_outcome(outcome) {
                Applied::Proceed => {}
                Applied::Halt => {
                    self.state.finish();
                    return false;
                }
                Applied::Redirect(target) => {
                    self.state.finish();
                    self.navigate(target, RouteOptions::default(), false).await;
                    return false;
                }
            }
        }

        let outcome = self.phases.run_before_resolve().await;
        match self.apply_outcome(outcome) {
            Applied::Proceed => true,
            Applied::Halt => {
                self.state.finish();
                false
            }
            Applied::Redirect(target) => {
                self.state.finish();
                self.navigate(target, RouteOptions::default(), false).await;
                false
            }
        }
    }

    /// To be called by the host binding once the destination screen has
    /// become active. Runs the afterEach hooks and returns the router to
    /// idle.
    ///
    /// A vetoed or finished navigation has nothing left to announce, so a
    /// call while idle is a warning no-op.
    pub async fn invoke_after_each(&mut self) {
        if !self.state.is_navigating() {
            router_warn!("afterEach invoked with no navigation in flight");
            return;
        }
        self.phases.run_after_each().await;
        self.state.finish();
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Merge caller options over the router defaults and resolve the
    /// effective props for this navigation.
    ///
    /// Props are resolved into the options' `context`, a per-navigation
    /// scratch; the shared route-table entry is never written. Precedence,
    /// weakest first: route `meta` entries, the route's `meta.props`
    /// object, the route's own `props`, caller-supplied `props`.
    fn effective_options(&self, route: &Arc<Route>, options: RouteOptions) -> RouteOptions {
        let mut effective = options;
        if effective.transition.is_none() {
            effective.transition = Some(self.default_transition);
        }
        effective.context = Self::resolve_props(route, &effective.props);
        effective
    }

    fn resolve_props(route: &Arc<Route>, caller_props: &MetaMap) -> MetaMap {
        let mut resolved = MetaMap::new();
        for (key, value) in &route.meta {
            if key == "props" {
                continue;
            }
            resolved.insert(key.clone(), value.clone());
        }
        if let Some(Value::Object(meta_props)) = route.meta.get("props") {
            for (key, value) in meta_props {
                resolved.insert(key.clone(), value.clone());
            }
        }
        for (key, value) in &route.props {
            resolved.insert(key.clone(), value.clone());
        }
        for (key, value) in caller_props {
            resolved.insert(key.clone(), value.clone());
        }
        resolved
    }

    fn apply_outcome(&mut self, outcome: GuardOutcome) -> Applied {
        match outcome {
            GuardOutcome::Allow => Applied::Proceed,
            GuardOutcome::Deny => {
                router_debug!("navigation denied by guard");
                Applied::Halt
            }
            GuardOutcome::Fail(error) => {
                self.report_error(&error);
                Applied::Halt
            }
            GuardOutcome::Redirect(target) => Applied::Redirect(target),
        }
    }

    fn report_error(&self, error: &NavigationError) {
        router_error!("navigation failed: {}", error);
        for callback in &self.error_callbacks {
            callback(error);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        forward: Arc<Mutex<Vec<String>>>,
        backward: Arc<AtomicUsize>,
        back_stack: Arc<AtomicUsize>,
    }

    impl ViewHost for RecordingHost {
        fn navigate_forward(&self, route: &Arc<Route>, _options: &RouteOptions) {
            self.forward.lock().unwrap().push(route.path.clone());
        }

        fn navigate_backward(&self, _options: &RouteOptions) {
            self.backward.fetch_add(1, Ordering::SeqCst);
        }

        fn back_stack_len(&self) -> Option<usize> {
            Some(self.back_stack.load(Ordering::SeqCst))
        }
    }

    fn two_route_router(host: RecordingHost) -> Router {
        Router::builder()
            .route(Route::new("/a").name("a"))
            .route(Route::new("/b").name("b"))
            .host(host)
            .build()
    }

    fn settle(router: &mut Router) {
        assert!(block_on(router.invoke_before_resolve()));
        block_on(router.invoke_after_each());
    }

    #[test]
    fn test_push_commits_route_and_history() {
        let host = RecordingHost::default();
        let forward = host.forward.clone();
        let mut router = two_route_router(host);

        block_on(router.push("/a", RouteOptions::default()));
        settle(&mut router);
        block_on(router.push("/b", RouteOptions::default()));
        settle(&mut router);

        assert_eq!(router.current_route().unwrap().path, "/b");
        assert_eq!(router.history(), ["/a"]);
        assert_eq!(*forward.lock().unwrap(), vec!["/a", "/b"]);
        assert!(!router.is_navigating());
    }

    #[test]
    fn test_repush_of_active_route_keeps_history_clean() {
        let mut router = two_route_router(RecordingHost::default());

        block_on(router.push("/a", RouteOptions::default()));
        settle(&mut router);
        block_on(router.push("/a", RouteOptions::default()));
        settle(&mut router);

        assert_eq!(router.current_route().unwrap().path, "/a");
        assert!(router.history().is_empty());
    }

    #[test]
    fn test_missing_route_is_a_warning_noop() {
        let host = RecordingHost::default();
        let forward = host.forward.clone();
        let mut router = two_route_router(host);

        block_on(router.push("/missing", RouteOptions::default()));

        assert!(router.current_route().is_none());
        assert!(router.history().is_empty());
        assert!(!router.is_navigating());
        assert!(forward.lock().unwrap().is_empty());
    }

    #[test]
    fn test_single_flight_rejects_second_push() {
        let mut router = two_route_router(RecordingHost::default());

        block_on(router.push("/a", RouteOptions::default()));
        // Still transitioning: the host has not reported back yet.
        assert_eq!(router.phase(), NavigationPhase::Transitioning);

        block_on(router.push("/b", RouteOptions::default()));
        assert_eq!(router.new_route().unwrap().path, "/a");
        assert_eq!(router.current_route().unwrap().path, "/a");
    }

    #[test]
    fn test_redirect_loop_reports_error() {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = errors.clone();

        let mut router = two_route_router(RecordingHost::default());
        router.add_before_each(GuardCallback::sync(|_to, _from| {
            GuardOutcome::redirect("/b")
        }));
        router.on_error(move |error| {
            sink.lock().unwrap().push(error.clone());
        });

        block_on(router.push("/a", RouteOptions::default()));

        assert!(!router.is_navigating());
        assert!(router.current_route().is_none());
        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], NavigationError::RedirectLoop { .. }));
    }

    #[test]
    fn test_modal_handle_notified_once() {
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = notified.clone();

        let mut router = two_route_router(RecordingHost::default());
        router.set_modal_handle(ModalHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        block_on(router.push("/a", RouteOptions::default()));
        settle(&mut router);
        block_on(router.push("/b", RouteOptions::default()));
        settle(&mut router);

        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_before_enter_deny_resets_to_idle() {
        let mut router = Router::builder()
            .route(
                Route::new("/guarded")
                    .before_enter(GuardCallback::sync(|_to, _from| GuardOutcome::Deny)),
            )
            .host(RecordingHost::default())
            .build();

        block_on(router.push("/guarded", RouteOptions::default()));
        assert!(!block_on(router.invoke_before_resolve()));
        assert!(!router.is_navigating());
    }

    #[test]
    fn test_resolved_props_precedence() {
        use serde_json::json;

        let route = Arc::new(
            Route::new("/p")
                .meta("flag", json!(1))
                .meta("props", json!({ "flag": 2, "route": true }))
                .prop("flag", json!(3)),
        );
        let mut caller = MetaMap::new();
        caller.insert("flag".to_string(), json!(4));

        let resolved = Router::resolve_props(&route, &caller);
        assert_eq!(resolved.get("flag"), Some(&json!(4)));
        assert_eq!(resolved.get("route"), Some(&json!(true)));
        // The shared route entry is untouched.
        assert_eq!(route.meta.get("flag"), Some(&json!(1)));
    }
}
