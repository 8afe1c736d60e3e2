//! Error handling for the router.
//!
//! Navigation never throws across the public [`Router`](crate::Router)
//! boundary. Failures are represented as [`NavigationError`] values and
//! delivered to the callbacks registered with
//! [`Router::on_error`](crate::Router::on_error); everything else is
//! observable only through state changes and the log.
//!
//! # Examples
//!
//! ```
//! use stack_navigator::error::NavigationError;
//!
//! let err = NavigationError::RouteNotFound { path: "/missing".into() };
//! assert_eq!(err.to_string(), "Route not found: /missing");
//! ```

use std::fmt;
use std::sync::Arc;

/// Errors that can terminate a navigation attempt.
///
/// Implements [`std::error::Error`] and [`Display`](std::fmt::Display) for
/// idiomatic error handling. Guard authors typically construct
/// [`Custom`](Self::Custom) values via [`NavigationError::custom`] and
/// return them through [`GuardOutcome::fail`](crate::GuardOutcome::fail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The requested route is not present in the route table.
    RouteNotFound {
        /// The path or name that failed to resolve.
        path: String,
    },

    /// A guard denied the navigation.
    GuardDenied {
        /// Human-readable reason supplied by the guard.
        reason: String,
    },

    /// A chain of guard redirects exceeded the hop limit.
    RedirectLoop {
        /// The target of the hop at which the chain was cut off.
        path: String,
    },

    /// Application-defined failure raised from a guard.
    Custom {
        /// Free-form message.
        message: String,
    },
}

impl NavigationError {
    /// Create an application-defined error with the given message.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::RouteNotFound { path } => {
                write!(f, "Route not found: {}", path)
            }
            NavigationError::GuardDenied { reason } => {
                write!(f, "Navigation denied: {}", reason)
            }
            NavigationError::RedirectLoop { path } => {
                write!(f, "Redirect loop detected while navigating to: {}", path)
            }
            NavigationError::Custom { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for NavigationError {}

/// Callback invoked whenever a navigation resolves to a failure.
///
/// Registered through [`Router::on_error`](crate::Router::on_error).
pub type ErrorCallback = Arc<dyn Fn(&NavigationError) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_not_found_display() {
        let err = NavigationError::RouteNotFound {
            path: "/test".to_string(),
        };
        assert_eq!(err.to_string(), "Route not found: /test");
    }

    #[test]
    fn test_custom_display() {
        let err = NavigationError::custom("store offline");
        assert_eq!(err.to_string(), "store offline");
    }

    #[test]
    fn test_redirect_loop_display() {
        let err = NavigationError::RedirectLoop {
            path: "/a".to_string(),
        };
        assert!(err.to_string().contains("/a"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            NavigationError::custom("x"),
            NavigationError::Custom {
                message: "x".to_string()
            }
        );
        assert_ne!(
            NavigationError::custom("x"),
            NavigationError::GuardDenied {
                reason: "x".to_string()
            }
        );
    }
}
