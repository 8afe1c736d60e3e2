//! Interfaces to the host view system.
//!
//! The router performs no visual work. Pushing and popping screens is
//! delegated to a [`ViewHost`] implementation, and the host in turn
//! reports its own lifecycle back through
//! [`Router::invoke_before_resolve`](crate::Router::invoke_before_resolve)
//! and [`Router::invoke_after_each`](crate::Router::invoke_after_each),
//! each expected exactly once per transition.

use crate::route::{Route, RouteOptions};
use std::fmt;
use std::sync::Arc;

/// The host's screen-transition primitive.
///
/// Both navigation methods return nothing; the host is assumed to
/// eventually fire its own "about to become active" / "became active"
/// events, wired to the router's `invoke_*` notification methods.
pub trait ViewHost: Send + Sync {
    /// Push the destination screen.
    fn navigate_forward(&self, route: &Arc<Route>, options: &RouteOptions);

    /// Pop back to the previous screen.
    fn navigate_backward(&self, options: &RouteOptions);

    /// Depth of the host's native back-stack, or `None` when no frame is
    /// active. A backward navigation with an exhausted back-stack falls
    /// back to the configured fallback route instead.
    fn back_stack_len(&self) -> Option<usize>;
}

/// Callback invoked right before the host pushes a screen.
pub type RouteToCallback = Arc<dyn Fn(&Arc<Route>, &RouteOptions) + Send + Sync>;

/// Callback invoked right before the host pops a screen.
pub type RouteBackCallback = Arc<dyn Fn(&Arc<Route>, &RouteOptions) + Send + Sync>;

/// One-shot bridge to a modal's owning view.
///
/// When navigation starts from inside a modal presentation, the host
/// registers a handle here; the router notifies it once, after the
/// beforeEach phase allows the navigation and before the screen
/// transition, then drops it.
pub struct ModalHandle {
    notify: Arc<dyn Fn() + Send + Sync>,
}

impl ModalHandle {
    /// Wrap the host-side "navigating from" notification.
    pub fn new<F>(notify: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            notify: Arc::new(notify),
        }
    }

    pub(crate) fn notify_navigating_from(&self) {
        (self.notify)();
    }
}

impl fmt::Debug for ModalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_modal_handle_notifies() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();
        let handle = ModalHandle::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        handle.notify_navigating_from();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
