//! Logging facade.
//!
//! The router never talks to a logging backend directly. Every diagnostic
//! goes through one of the `router_*!` macros below, which forward to the
//! [`log`](https://docs.rs/log) or [`tracing`](https://docs.rs/tracing)
//! crate depending on the enabled feature. Enable at most one of the two
//! features; `log` is on by default.
//!
//! With neither feature enabled the macros compile to nothing, so the
//! router stays usable in fully silent builds.
//!
//! ```ignore
//! use stack_navigator::{router_info, router_warn};
//!
//! router_info!("navigating to '{}'", path);
//! router_warn!("Route {} is missing", path);
//! ```

/// Emit a trace-level router diagnostic.
#[macro_export]
macro_rules! router_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Emit a debug-level router diagnostic.
#[macro_export]
macro_rules! router_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Emit an info-level router diagnostic.
#[macro_export]
macro_rules! router_info {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Emit a warn-level router diagnostic.
///
/// Used for recoverable misconfiguration: unknown routes, back navigation
/// with nowhere to go, navigation requests issued while another one is
/// still in flight.
#[macro_export]
macro_rules! router_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Emit an error-level router diagnostic.
#[macro_export]
macro_rules! router_error {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
