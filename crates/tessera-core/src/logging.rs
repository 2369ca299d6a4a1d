//! Logging and tracing facilities for Tessera.
//!
//! Tessera uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; to see logs, install one in the host:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("tessera=debug,tessera_render::text=warn")
//!     .init();
//! ```
//!
//! Every subsystem logs under one of the [`targets`], and each pass phase runs
//! inside a [`PerfSpan`] so pass timings can be read from any span-aware
//! subscriber.

/// Span names used throughout Tessera for tracing.
pub mod span_names {
    /// A full collection pass (data, resize or interaction).
    pub const PASS: &str = "tessera::pass";
    /// Aggregate metrics evaluation.
    pub const METRICS: &str = "tessera::metrics";
    /// Layout computation.
    pub const LAYOUT: &str = "tessera::layout";
    /// Tile style/geometry finalization.
    pub const FINALIZE: &str = "tessera::finalize";
    /// Text measurement.
    pub const MEASURE: &str = "tessera::measure";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core target.
    pub const CORE: &str = "tessera_core";
    /// Signal emission target.
    pub const SIGNAL: &str = "tessera_core::signal";
    /// Collection controller target.
    pub const COLLECTION: &str = "tessera::collection";
    /// Layout engine target.
    pub const LAYOUT: &str = "tessera::layout";
    /// Aggregate metrics target.
    pub const METRICS: &str = "tessera::metrics";
    /// Tile controller target.
    pub const TILE: &str = "tessera::tile";
    /// Style resolution target.
    pub const RESOLVE: &str = "tessera_style::resolve";
    /// Configuration parsing target.
    pub const SETTINGS: &str = "tessera_style::settings";
    /// Text measurement target.
    pub const TEXT: &str = "tessera_render::text";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of pass phases.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "tessera::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with a consistent
/// target name.
#[macro_export]
macro_rules! tessera_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "tessera", $($arg)*)
    };
}

#[macro_export]
macro_rules! tessera_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "tessera", $($arg)*)
    };
}

#[macro_export]
macro_rules! tessera_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "tessera", $($arg)*)
    };
}
