//! Telemetry
//!
//! Structured logging for the staging layer. The ring buffer itself never
//! logs; [`Stage`](crate::stage::Stage) reports rejected batches, evictions
//! and watermark crossings through `tracing`, inside a per-stage span.
//! Log levels are configurable via RUST_LOG.

use tracing::{info_span, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when RUST_LOG is unset or cannot be parsed.
pub const DEFAULT_FILTER: &str = "static_fifo=warn";

/// Install the global subscriber, filtered by RUST_LOG or [`DEFAULT_FILTER`].
pub fn init_tracing() -> bool {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    init_tracing_with_filter(&filter)
}

/// Parse `filter`, falling back to [`DEFAULT_FILTER`] when it is invalid.
pub fn stage_filter(filter: &str) -> EnvFilter {
    EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a compact stderr subscriber for stage events.
///
/// Returns `false` when a global subscriber was already set, by this crate
/// or by the host application.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .compact()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stage_filter(filter))
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

/// Escape control characters so a stage name cannot forge log lines.
pub fn sanitize_for_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x1b' => out.push_str("\\e"),
            '\x00' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

/// Span wrapping every event a stage emits
pub fn stage_span(name: &str, capacity: usize) -> Span {
    let safe_name = sanitize_for_log(name);
    info_span!("fifo.stage", stage = safe_name.as_str(), capacity = capacity)
}

/// Initialize tracing for tests with a simple subscriber
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
