//! Vue-Router-style navigation for host view stacks.
//!
//! `stack-navigator` is a client-side navigation controller for UI
//! applications whose host exposes a push/pop view-stack primitive rather
//! than a browser history API. It provides:
//!
//! - a declarative, flat [`RouteTable`] addressed by path or name;
//! - three ordered guard phases — beforeEach, beforeResolve, afterEach —
//!   whose callbacks may allow, deny, redirect, or fail a transition, in
//!   synchronous, future-returning, or continuation (`next`) style;
//! - a history stack with Vue-Router-compatible `back` semantics and a
//!   configurable fallback route;
//! - a store bridge that dispatches route metadata as application actions.
//!
//! The host view system stays behind the narrow [`ViewHost`] trait: the
//! router decides *whether* and *where* to navigate, the host performs
//! the visual transition and reports its lifecycle back through
//! [`Router::invoke_before_resolve`] and [`Router::invoke_after_each`].
//!
//! # Quick start
//!
//! ```
//! use stack_navigator::{GuardCallback, GuardOutcome, Route, RouteOptions, Router};
//!
//! let mut router = Router::builder()
//!     .route(Route::new("/home").name("home"))
//!     .route(Route::new("/login"))
//!     .build();
//!
//! // Redirect everything to the login screen until signed in.
//! let signed_in = false;
//! router.add_before_each(GuardCallback::sync(move |to, _from| {
//!     if signed_in || to.path == "/login" {
//!         GuardOutcome::Allow
//!     } else {
//!         GuardOutcome::redirect("/login")
//!     }
//! }));
//!
//! pollster::block_on(router.push("home", RouteOptions::default()));
//! assert_eq!(router.current_route().unwrap().path, "/login");
//! ```
//!
//! # Features
//!
//! | Feature | Effect | Default |
//! |---------|--------|---------|
//! | `log` | diagnostics through the `log` crate | yes |
//! | `tracing` | diagnostics through the `tracing` crate | no |
//!
//! The two logging features are mutually exclusive; enable at most one.

pub mod dispatcher;
pub mod error;
pub mod guards;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod phases;
pub mod registry;
pub mod route;
pub mod router;
pub mod state;

pub use dispatcher::{register_action_dispatcher, MetaDispatcher, StoreDispatch};
pub use error::{ErrorCallback, NavigationError};
pub use guards::{
    AsyncGuardFn, ContinuationGuardFn, GuardCallback, GuardSet, HookFn, SyncGuardFn,
};
pub use host::{ModalHandle, RouteBackCallback, RouteToCallback, ViewHost};
pub use lifecycle::{GuardOutcome, Next};
pub use phases::GuardPhases;
pub use registry::{RouterRegistry, SharedRouter};
pub use route::{MetaMap, Route, RouteOptions, RouteTable, RouteTarget, Transition};
pub use router::{Router, RouterBuilder, MAX_REDIRECT_DEPTH};
pub use state::{NavigationPhase, NavigationState};
