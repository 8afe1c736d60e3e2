//! Guard pipeline demo.
//!
//! Console walkthrough of the navigation pipeline: an auth guard that
//! redirects to the login screen, a guard that fails a broken route
//! through the error channel, store dispatch from route metadata, and a
//! backward navigation through history.
//!
//! Run with `RUST_LOG=debug cargo run --example guard_demo` to see the
//! router's own diagnostics interleaved with the demo output.

use pollster::block_on;
use serde_json::{json, Value};
use stack_navigator::{
    register_action_dispatcher, GuardCallback, GuardOutcome, NavigationError, Route, RouteOptions,
    Router, StoreDispatch, ViewHost,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Console host
// ============================================================================

/// Stands in for a native view stack: prints each transition and tracks
/// the stack depth the router consults on backward navigation.
struct ConsoleHost {
    depth: AtomicUsize,
}

impl ViewHost for ConsoleHost {
    fn navigate_forward(&self, route: &Arc<Route>, options: &RouteOptions) {
        self.depth.fetch_add(1, Ordering::Relaxed);
        if options.context.is_empty() {
            println!("host: push '{}'", route.path);
        } else {
            println!(
                "host: push '{}' with context {}",
                route.path,
                Value::Object(options.context.clone())
            );
        }
    }

    fn navigate_backward(&self, _options: &RouteOptions) {
        self.depth.fetch_sub(1, Ordering::Relaxed);
        println!("host: pop");
    }

    fn back_stack_len(&self) -> Option<usize> {
        Some(self.depth.load(Ordering::Relaxed))
    }
}

struct ConsoleStore;

impl StoreDispatch for ConsoleStore {
    fn dispatch(&self, action: &str, payload: &Value) {
        println!("store: {}({})", action, payload);
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    env_logger::init();

    let signed_in = Arc::new(AtomicBool::new(false));

    let mut router = Router::builder()
        .route(Route::new("/home").name("home"))
        .route(Route::new("/login").name("login"))
        .route(
            Route::new("/account")
                .name("account")
                .meta("store", json!({ "loadAccount": true })),
        )
        .route(Route::new("/broken"))
        .host(ConsoleHost {
            depth: AtomicUsize::new(0),
        })
        .back_fallback_path("/home")
        .build();

    register_action_dispatcher(&mut router, Arc::new(ConsoleStore));

    let auth = Arc::clone(&signed_in);
    router.add_before_each(GuardCallback::sync(move |to, _from| {
        if to.path == "/account" && !auth.load(Ordering::Relaxed) {
            println!("guard: '/account' needs a session, redirecting to '/login'");
            GuardOutcome::redirect("/login")
        } else {
            GuardOutcome::Allow
        }
    }));
    router.add_before_each(GuardCallback::sync(|to, _from| {
        if to.path == "/broken" {
            GuardOutcome::fail(NavigationError::custom("backend offline"))
        } else {
            GuardOutcome::Allow
        }
    }));
    router.add_after_each(GuardCallback::hook(|to, from| {
        println!(
            "afterEach: '{}' -> '{}'",
            from.map_or("<start>", |f| f.path.as_str()),
            to.path
        );
    }));
    router.on_error(|error| println!("error channel: {}", error));

    println!("-- signed out, '/account' redirects --");
    go(&mut router, "home");
    go(&mut router, "account");

    println!("-- signed in, '/account' resolves and dispatches its meta --");
    signed_in.store(true, Ordering::Relaxed);
    go(&mut router, "account");

    println!("-- '/broken' fails through the error channel --");
    go(&mut router, "/broken");

    println!("-- one step back through history --");
    block_on(router.back(RouteOptions::default(), None));
    settle(&mut router);

    println!(
        "current: '{}', history: {:?}",
        router.current_route().map_or_else(String::new, |r| r.path.clone()),
        router.history()
    );
}

/// Navigate forward and, when the navigation committed, play the host
/// lifecycle the way a real host binding would.
fn go(router: &mut Router, target: &str) {
    block_on(router.push(target, RouteOptions::default()));
    settle(router);
}

fn settle(router: &mut Router) {
    if !router.is_navigating() {
        return;
    }
    if block_on(router.invoke_before_resolve()) {
        block_on(router.invoke_after_each());
    }
}
