//! Emulated host services for sandboxed-plugin unit tests
//!
//! Provides the state machine behind the fixed set of host requests a
//! sandboxed plugin may issue:
//! - **LogStore**: append-only per-severity log capture
//! - **TickController**: last requested scheduling-tick period
//! - **QueueRegistry**: named, densely-numbered FIFO byte queues
//! - **SharedDataStore**: key/value store with CAS-guarded writes
//! - **MetricsRegistry**: name→id metric definitions with accumulated values
//! - **HostEnvironment**: composes the five above behind one lock
//!
//! ## Design Principle: Explicit Environment
//!
//! There is no process-wide host singleton. Each test constructs its own
//! [`HostEnvironment`], passes it (or an `Arc` of it) to whatever drives
//! the emulated entry points, and drops it afterward. Environments do not
//! share state.
//!
//! ## Atomicity
//!
//! Every entry point is one lock acquisition: the call either completes
//! its mutation or returns an error having changed nothing. Composite
//! read-modify-write protocols are the caller's job, supported by the
//! CAS contract of the shared data store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod environment;
pub mod log;
pub mod metrics;
pub mod queue;
pub mod shared_data;
pub mod tick;

pub use config::EnvConfig;
pub use environment::HostEnvironment;
pub use shared_data::SharedEntry;
