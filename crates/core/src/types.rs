//! Foundational types for the emulated host contract
//!
//! This module defines the enumerations and handle types the host services
//! operate on:
//! - LogLevel: six-level severity scale for captured plugin logs
//! - MetricKind: declared metric shape (never validated after definition)
//! - QueueId: dense handle for a registered shared queue
//! - MetricId: dense handle for a defined metric
//!
//! QueueId and MetricId are assigned sequentially from 0 in registration
//! order: the next id is always the count of entities registered so far.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a captured plugin log message.
///
/// The raw values 0..=5 are the wire encoding of the foreign-call
/// contract. Anything outside that range is a caller bug, not a runtime
/// condition; see [`LogLevel::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum LogLevel {
    /// Finest-grained diagnostic output.
    Trace = 0,
    /// Debug-level diagnostic output.
    Debug = 1,
    /// Routine informational messages.
    Info = 2,
    /// Something unexpected but recoverable.
    Warn = 3,
    /// An operation failed.
    Error = 4,
    /// The plugin considers itself unable to continue.
    Critical = 5,
}

impl LogLevel {
    /// Number of severity levels in the contract.
    pub const COUNT: usize = 6;

    /// All levels in ascending severity order.
    pub const ALL: [LogLevel; Self::COUNT] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    /// Decode a raw wire value. Returns `None` for anything outside 0..=5.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(LogLevel::Trace),
            1 => Some(LogLevel::Debug),
            2 => Some(LogLevel::Info),
            3 => Some(LogLevel::Warn),
            4 => Some(LogLevel::Error),
            5 => Some(LogLevel::Critical),
            _ => None,
        }
    }

    /// The raw wire value of this level.
    pub fn as_raw(self) -> u32 {
        self as u32
    }

    /// Bucket index for per-level storage.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        };
        write!(f, "{}", name)
    }
}

/// Declared shape of a metric.
///
/// Recorded at definition time and never validated afterward: increments
/// and absolute writes are accepted for every kind alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum MetricKind {
    /// Monotonically intended counter (not enforced).
    Counter = 0,
    /// Point-in-time gauge.
    Gauge = 1,
    /// Distribution sample sink.
    Histogram = 2,
}

impl MetricKind {
    /// Decode a raw wire value. Returns `None` for anything outside 0..=2.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(MetricKind::Counter),
            1 => Some(MetricKind::Gauge),
            2 => Some(MetricKind::Histogram),
            _ => None,
        }
    }

    /// The raw wire value of this kind.
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        };
        write!(f, "{}", name)
    }
}

/// Handle for a registered shared queue.
///
/// Ids are dense and sequential (0, 1, 2, …) in registration order.
/// Registering the same name twice yields the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueId(u32);

impl QueueId {
    /// Wrap a raw wire value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw wire value of this id.
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Index into dense registry storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle for a defined metric.
///
/// Ids are dense and sequential (0, 1, 2, …) in definition order.
/// Defining the same name twice yields the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricId(u32);

impl MetricId {
    /// Wrap a raw wire value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw wire value of this id.
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Index into dense registry storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
