//! Guard callbacks and the single-phase guard runner.
//!
//! A [`GuardSet`] owns one ordered list of [`GuardCallback`]s and runs
//! them against a fixed `(to, from)` route pair. Guards come in four
//! shapes, chosen explicitly at registration time:
//!
//! | Shape | Signature | Use |
//! |-------|-----------|-----|
//! | [`Sync`](GuardCallback::Sync) | `(to, from) -> GuardOutcome` | plain checks |
//! | [`Async`](GuardCallback::Async) | `(to, from) -> impl Future<Output = GuardOutcome>` | checks that await I/O |
//! | [`Continuation`](GuardCallback::Continuation) | `(to, from, &mut Next) -> GuardOutcome` | vetoing through [`Next`] |
//! | [`Hook`](GuardCallback::Hook) | `(to, from)` | post-navigation notification, no veto |
//!
//! # Execution order
//!
//! Callbacks run strictly in insertion order. The first callback whose
//! return value or final [`Next`] call produces a non-allow signal wins;
//! once the set is cancelled, the remaining callbacks are never invoked.
//! An outcome retained through [`Next`] without cancellation survives
//! later allowing callbacks and becomes the result of the run.
//!
//! Guard sets are long-lived: the router retargets them with
//! [`set_routes`](GuardSet::set_routes) at the start of every navigation,
//! which also clears cancellation left over from the previous run.
//!
//! A guard that panics is not caught here; a guard that never resolves
//! stalls the navigation, there is no timeout.
//!
//! # Example
//!
//! ```
//! use stack_navigator::{GuardCallback, GuardOutcome, GuardSet, Route};
//! use std::sync::Arc;
//!
//! let mut set = GuardSet::new(false);
//! set.add(GuardCallback::sync(|to, _from| {
//!     if to.path == "/forbidden" {
//!         GuardOutcome::Deny
//!     } else {
//!         GuardOutcome::Allow
//!     }
//! }));
//!
//! set.set_routes(Arc::new(Route::new("/ok")), None);
//! let outcome = pollster::block_on(set.run());
//! assert!(outcome.is_allow());
//! ```

use crate::lifecycle::{GuardOutcome, Next};
use crate::route::Route;
use crate::router_warn;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

// ============================================================================
// Callback function types
// ============================================================================

/// Plain synchronous guard function.
pub type SyncGuardFn =
    Arc<dyn Fn(&Arc<Route>, Option<&Arc<Route>>) -> GuardOutcome + Send + Sync>;

/// Guard function returning a boxed future; awaited before the next guard runs.
pub type AsyncGuardFn = Arc<
    dyn Fn(Arc<Route>, Option<Arc<Route>>) -> BoxFuture<'static, GuardOutcome> + Send + Sync,
>;

/// Guard function driven through a [`Next`] continuation handle.
pub type ContinuationGuardFn =
    Arc<dyn Fn(&Arc<Route>, Option<&Arc<Route>>, &mut Next) -> GuardOutcome + Send + Sync>;

/// Notification-only callback; no veto power.
pub type HookFn = Arc<dyn Fn(&Arc<Route>, Option<&Arc<Route>>) + Send + Sync>;

// ============================================================================
// GuardCallback
// ============================================================================

/// A registered guard, tagged by invocation shape.
///
/// Construct through [`sync`](Self::sync), [`future`](Self::future),
/// [`with_next`](Self::with_next), or [`hook`](Self::hook).
#[derive(Clone)]
pub enum GuardCallback {
    /// Synchronous guard.
    Sync(SyncGuardFn),
    /// Future-returning guard.
    Async(AsyncGuardFn),
    /// Continuation-style guard.
    Continuation(ContinuationGuardFn),
    /// Post-navigation hook.
    Hook(HookFn),
}

impl GuardCallback {
    /// Create a synchronous guard.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&Arc<Route>, Option<&Arc<Route>>) -> GuardOutcome + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    /// Create a guard from an async function or future-returning closure.
    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn(Arc<Route>, Option<Arc<Route>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = GuardOutcome> + Send + 'static,
    {
        Self::Async(Arc::new(
            move |to, from| -> BoxFuture<'static, GuardOutcome> { Box::pin(f(to, from)) },
        ))
    }

    /// Create a continuation-style guard.
    pub fn with_next<F>(f: F) -> Self
    where
        F: Fn(&Arc<Route>, Option<&Arc<Route>>, &mut Next) -> GuardOutcome + Send + Sync + 'static,
    {
        Self::Continuation(Arc::new(f))
    }

    /// Create a post-navigation hook.
    pub fn hook<F>(f: F) -> Self
    where
        F: Fn(&Arc<Route>, Option<&Arc<Route>>) + Send + Sync + 'static,
    {
        Self::Hook(Arc::new(f))
    }

    /// Invoke in normal mode, feeding continuation calls into `next`.
    pub(crate) async fn invoke(
        &self,
        to: &Arc<Route>,
        from: Option<&Arc<Route>>,
        next: &mut Next,
    ) -> GuardOutcome {
        match self {
            GuardCallback::Sync(f) => f(to, from),
            GuardCallback::Async(f) => f(Arc::clone(to), from.cloned()).await,
            GuardCallback::Continuation(f) => f(to, from, next),
            GuardCallback::Hook(f) => {
                f(to, from);
                GuardOutcome::Allow
            }
        }
    }

    /// Invoke in hook mode: `(to, from)` only, outcome discarded.
    pub(crate) async fn invoke_as_hook(&self, to: &Arc<Route>, from: Option<&Arc<Route>>) {
        match self {
            GuardCallback::Hook(f) => f(to, from),
            GuardCallback::Sync(f) => {
                let _ = f(to, from);
            }
            GuardCallback::Async(f) => {
                let _ = f(Arc::clone(to), from.cloned()).await;
            }
            GuardCallback::Continuation(f) => {
                let mut next = Next::new();
                let _ = f(to, from, &mut next);
            }
        }
    }
}

impl fmt::Debug for GuardCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            GuardCallback::Sync(_) => "Sync",
            GuardCallback::Async(_) => "Async",
            GuardCallback::Continuation(_) => "Continuation",
            GuardCallback::Hook(_) => "Hook",
        };
        f.debug_tuple("GuardCallback").field(&shape).finish()
    }
}

// ============================================================================
// GuardSet
// ============================================================================

/// Runs one ordered guard list against a fixed `(to, from)` pair.
///
/// In hook mode (used for the afterEach phase) callbacks are invoked for
/// their side effects only: outcomes are discarded and nothing can cancel
/// the run.
pub struct GuardSet {
    callbacks: Vec<GuardCallback>,
    to: Option<Arc<Route>>,
    from: Option<Arc<Route>>,
    hook_mode: bool,
    cancelled: bool,
}

impl GuardSet {
    /// Create an empty guard set.
    pub fn new(hook_mode: bool) -> Self {
        Self {
            callbacks: Vec::new(),
            to: None,
            from: None,
            hook_mode,
            cancelled: false,
        }
    }

    /// Append a callback. Duplicates are allowed and run multiple times.
    pub fn add(&mut self, callback: GuardCallback) {
        self.callbacks.push(callback);
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether the set has no callbacks.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Retarget the set for a new navigation.
    ///
    /// Guard sets are reused across navigations, so stale cancellation
    /// from the previous run is cleared here.
    pub fn set_routes(&mut self, to: Arc<Route>, from: Option<Arc<Route>>) {
        self.to = Some(to);
        self.from = from;
        self.cancelled = false;
    }

    /// Run all callbacks in insertion order and resolve a single outcome.
    ///
    /// Without a target (no [`set_routes`](Self::set_routes) call yet) the
    /// run is a warning no-op that resolves to allow.
    pub async fn run(&mut self) -> GuardOutcome {
        let Some(to) = self.to.clone() else {
            router_warn!("guard set ran without a target route");
            return GuardOutcome::Allow;
        };
        let from = self.from.clone();

        let callbacks = self.callbacks.clone();
        let mut cancelled = self.cancelled;
        let mut resolved = GuardOutcome::Allow;

        for callback in &callbacks {
            if cancelled {
                break;
            }

            if self.hook_mode {
                callback.invoke_as_hook(&to, from.as_ref()).await;
                continue;
            }

            let mut next = Next::new();
            let verdict = callback.invoke(&to, from.as_ref(), &mut next).await;

            // Continuation calls first; the callback's own return value
            // takes effect after them.
            if let Some(outcome) = next.outcome() {
                resolved = outcome.clone();
            }
            if next.cancelled() {
                cancelled = true;
            }

            match verdict {
                GuardOutcome::Allow => {}
                other => {
                    cancelled = true;
                    resolved = other;
                    break;
                }
            }
        }

        self.cancelled = cancelled;
        resolved
    }
}

impl fmt::Debug for GuardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardSet")
            .field("callbacks", &self.callbacks.len())
            .field("hook_mode", &self.hook_mode)
            .field("cancelled", &self.cancelled)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
