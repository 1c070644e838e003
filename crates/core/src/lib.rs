//! Core types and errors for the plughost test environment
//!
//! This crate defines the foundational types used throughout the system:
//! - LogLevel: severity of a captured plugin log message
//! - MetricKind: declared shape of a metric at definition time
//! - QueueId / MetricId: dense numeric handles assigned at registration
//! - Error: recoverable per-call failures of the emulated host contract
//!
//! Fatal contract violations (out-of-range severity on log retrieval,
//! invoking an unimplemented capability) are deliberately NOT represented
//! here. They abort the test run instead of surfacing as a status; see the
//! environment crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{LogLevel, MetricId, MetricKind, QueueId};
