//! plughost - in-process emulation of a sandboxed-plugin host
//!
//! plughost stands in for the runtime a sandboxed plugin module would
//! otherwise call into, answering the fixed set of host requests
//! (logging, scheduling hints, inter-instance queues, a CAS-guarded
//! shared data store, and metrics) deterministically and synchronously,
//! so plugin logic can be unit-tested without a real host process.
//!
//! # Quick Start
//!
//! ```
//! use plughost::{HostEnvironment, MetricKind};
//!
//! // One environment per test; never a process-wide singleton.
//! let env = HostEnvironment::new();
//!
//! let q = env.register_queue("events");
//! env.enqueue(q, b"payload".to_vec()).unwrap();
//! assert_eq!(env.dequeue(q).unwrap(), b"payload");
//!
//! env.set_shared_data("session", b"state".to_vec(), 0).unwrap();
//! assert_eq!(env.shared_data("session").unwrap().cas, 1);
//!
//! let m = env.define_metric("requests", MetricKind::Counter);
//! env.increment_metric(m, 1).unwrap();
//! ```
//!
//! # Architecture
//!
//! The semantic entry points live on [`HostEnvironment`]
//! (`plughost-env`), which serializes every call behind one
//! environment-wide lock. Callers that speak the raw foreign-call
//! convention (address+length pairs, out-parameters, numeric statuses) go
//! through the [`HostCalls`] adapter (`plughost-abi`) instead; the
//! environment itself is free of any raw-memory concept.

pub use plughost_abi::{HostCalls, Status};
pub use plughost_core::{Error, LogLevel, MetricId, MetricKind, QueueId, Result};
pub use plughost_env::{EnvConfig, HostEnvironment, SharedEntry};
