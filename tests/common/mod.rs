//! Test utilities for navigation tests
//!
//! Provides a recording view host, a recording store, and a log capture
//! that attributes records to the thread that emitted them (tests run in
//! parallel, so global counters would race).

#![allow(dead_code)]

use log::{Level, Metadata, Record};
use serde_json::Value;
use stack_navigator::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once, OnceLock};
use std::thread::{self, ThreadId};

// ----------------------------------------------------------------------------
// Recording view host
// ----------------------------------------------------------------------------

/// View host that records every transition it is asked to perform.
///
/// The native back-stack depth is simulated: it grows on forward
/// transitions and shrinks on backward ones, and can be preset with
/// [`with_back_stack`](MockHost::with_back_stack).
#[derive(Clone, Default)]
pub struct MockHost {
    pub forward: Arc<Mutex<Vec<String>>>,
    pub backward: Arc<AtomicUsize>,
    pub back_stack: Arc<AtomicUsize>,
    pub last_context: Arc<Mutex<Option<MetaMap>>>,
}

impl MockHost {
    pub fn with_back_stack(depth: usize) -> Self {
        let host = Self::default();
        host.back_stack.store(depth, Ordering::SeqCst);
        host
    }

    pub fn forward_paths(&self) -> Vec<String> {
        self.forward.lock().unwrap().clone()
    }

    pub fn backward_count(&self) -> usize {
        self.backward.load(Ordering::SeqCst)
    }

    pub fn last_context(&self) -> Option<MetaMap> {
        self.last_context.lock().unwrap().clone()
    }
}

impl ViewHost for MockHost {
    fn navigate_forward(&self, route: &Arc<Route>, options: &RouteOptions) {
        self.forward.lock().unwrap().push(route.path.clone());
        *self.last_context.lock().unwrap() = Some(options.context.clone());
        self.back_stack.fetch_add(1, Ordering::SeqCst);
    }

    fn navigate_backward(&self, _options: &RouteOptions) {
        self.backward.fetch_add(1, Ordering::SeqCst);
        let depth = self.back_stack.load(Ordering::SeqCst);
        if depth > 0 {
            self.back_stack.store(depth - 1, Ordering::SeqCst);
        }
    }

    fn back_stack_len(&self) -> Option<usize> {
        Some(self.back_stack.load(Ordering::SeqCst))
    }
}

// ----------------------------------------------------------------------------
// Recording store
// ----------------------------------------------------------------------------

/// Store that records every dispatched action.
#[derive(Default)]
pub struct RecordingStore {
    actions: Mutex<Vec<(String, Value)>>,
}

impl RecordingStore {
    pub fn actions(&self) -> Vec<(String, Value)> {
        self.actions.lock().unwrap().clone()
    }
}

impl StoreDispatch for RecordingStore {
    fn dispatch(&self, action: &str, payload: &Value) {
        self.actions
            .lock()
            .unwrap()
            .push((action.to_string(), payload.clone()));
    }
}

// ----------------------------------------------------------------------------
// Log capture
// ----------------------------------------------------------------------------

struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;
static RECORDS: OnceLock<Mutex<Vec<(ThreadId, Level, String)>>> = OnceLock::new();

fn records() -> &'static Mutex<Vec<(ThreadId, Level, String)>> {
    RECORDS.get_or_init(|| Mutex::new(Vec::new()))
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        records().lock().unwrap().push((
            thread::current().id(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

/// Install the capturing logger. Safe to call from every test.
pub fn init_logger() {
    static START: Once = Once::new();
    START.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
}

/// Drop all records emitted by the current thread.
pub fn clear_thread_log() {
    let id = thread::current().id();
    records().lock().unwrap().retain(|(tid, _, _)| *tid != id);
}

/// Warn-level messages emitted by the current thread, oldest first.
pub fn thread_warnings() -> Vec<String> {
    let id = thread::current().id();
    records()
        .lock()
        .unwrap()
        .iter()
        .filter(|(tid, level, _)| *tid == id && *level == Level::Warn)
        .map(|(_, _, message)| message.clone())
        .collect()
}

// ----------------------------------------------------------------------------
// Lifecycle helpers
// ----------------------------------------------------------------------------

/// Drive the host lifecycle of a committed navigation to completion.
pub fn settle(router: &mut Router) {
    assert!(pollster::block_on(router.invoke_before_resolve()));
    pollster::block_on(router.invoke_after_each());
}

/// Push a route and settle the host lifecycle.
pub fn push_and_settle(router: &mut Router, target: &str) {
    pollster::block_on(router.push(target, RouteOptions::default()));
    settle(router);
}
