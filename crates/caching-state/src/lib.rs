//! Task output cacheability verdicts for cuenv.
//!
//! Before a task's result is looked up in or written to the cache, the build
//! consults its [`CachingState`]: either caching is enabled, or it is disabled
//! with exactly one categorized [`DisabledReason`].
//!
//! # Key Types
//!
//! - [`CachingState`]: the verdict, with canonical [`CachingState::ENABLED`]
//!   and [`CachingState::DISABLED`] constants
//! - [`DisabledReason`]: category plus human-readable description
//! - [`DisabledReasonCategory`]: closed set of causes, for aggregation
//! - [`CacheSettings`]: build-wide switch selecting the initial state
//! - [`CachingSummary`]: verdicts of one build, rendered for diagnostics
//!
//! # Example
//!
//! ```
//! use cuenv_caching_state::{CachingState, DisabledReasonCategory};
//!
//! let state = CachingState::disabled(
//!     DisabledReasonCategory::NoOutputsDeclared.reason("Task has no outputs declared"),
//! );
//! assert!(!state.is_enabled());
//! assert_eq!(state.disabled_reason(), Some("Task has no outputs declared"));
//!
//! assert!(CachingState::enabled().reason().is_none());
//! ```

mod category;
mod error;
mod reason;
mod settings;
mod state;
mod summary;

pub use category::DisabledReasonCategory;
pub use error::{Error, Result};
pub use reason::DisabledReason;
pub use settings::{CACHE_ENABLED_ENV, CacheSettings};
pub use state::CachingState;
pub use summary::{CachingSummary, TaskCachingVerdict};

/// Emit a task caching disabled event.
///
/// # Example
/// ```rust,ignore
/// emit_task_caching_disabled!("lint", "no_outputs_declared", "Task has no outputs declared");
/// ```
#[macro_export]
macro_rules! emit_task_caching_disabled {
    ($name:expr, $category:expr, $reason:expr) => {
        ::tracing::info!(
            target: "cuenv::task",
            event_type = "task.caching_disabled",
            task_name = %$name,
            category = %$category,
            reason = %$reason,
        )
    };
}
