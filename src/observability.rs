//! Logging infrastructure for rowscan.
//!
//! rowscan uses `tracing` for structured logging. All events use target
//! "rowscan" and include an `event` field for filtering.
//!
//! ## Library Integration
//!
//! rowscan never initializes a global subscriber. Applications configure
//! tracing via `tracing_subscriber` or similar.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: subsystem (e.g., "plan", "range", "filter")
//! - Use `%` for Display, `?` for Debug formatting
//! - Never log per produced row

/// Target for all rowscan log events.
pub(crate) const ROWSCAN_TARGET: &str = "rowscan";

/// Macro for debug-level log events.
///
/// # Example
/// ```ignore
/// log_debug!(
///     component = "plan",
///     event = "scan_plan_built",
///     projection_width = width,
/// );
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::ROWSCAN_TARGET, $($field)*)
    };
}

/// Macro for trace-level log events.
macro_rules! log_trace {
    ($($field:tt)*) => {
        ::tracing::trace!(target: $crate::observability::ROWSCAN_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
