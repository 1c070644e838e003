//! LogStore: append-only per-severity log capture
//!
//! Captured messages are bucketed by [`LogLevel`] in insertion order and
//! never removed for the environment's lifetime. Each recorded message is
//! also mirrored to the diagnostic sink (a `tracing` event at the
//! corresponding severity) unless mirroring was disabled at construction.

use plughost_core::LogLevel;

/// Per-severity captured plugin log messages.
#[derive(Debug)]
pub struct LogStore {
    buckets: [Vec<String>; LogLevel::COUNT],
    mirror: bool,
}

impl LogStore {
    /// Create an empty store. `mirror` controls forwarding to the
    /// diagnostic sink.
    pub fn new(mirror: bool) -> Self {
        Self {
            buckets: Default::default(),
            mirror,
        }
    }

    /// Append `message` to the bucket for `level`. Always succeeds.
    pub fn record(&mut self, level: LogLevel, message: String) {
        if self.mirror {
            mirror_to_sink(level, &message);
        }
        self.buckets[level.index()].push(message);
    }

    /// Recorded messages for `level`, in insertion order.
    pub fn messages(&self, level: LogLevel) -> &[String] {
        &self.buckets[level.index()]
    }
}

/// Forward a captured message to the diagnostic sink at the mapped
/// severity. `Critical` has no direct `tracing` equivalent and maps to
/// `error`.
fn mirror_to_sink(level: LogLevel, message: &str) {
    match level {
        LogLevel::Trace => tracing::trace!(target: "plugin", "{message}"),
        LogLevel::Debug => tracing::debug!(target: "plugin", "{message}"),
        LogLevel::Info => tracing::info!(target: "plugin", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "plugin", "{message}"),
        LogLevel::Error | LogLevel::Critical => tracing::error!(target: "plugin", "{message}"),
    }
}
