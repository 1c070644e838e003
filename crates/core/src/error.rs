//! Error types for the emulated host contract
//!
//! All recoverable per-call failures are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: each variant carries typed fields for the failing entity
//! - **Serializable**: can be converted to/from JSON for assertions and logs
//! - **State-preserving**: a returned error guarantees no mutation happened
//!
//! Fatal contract violations (retrieving logs for an out-of-range severity,
//! invoking the unimplemented buffer capability) abort the process instead
//! of appearing here. The split is intentional: recoverable statuses are
//! runtime conditions the caller handles or retries; fatal violations are
//! caller bugs.

use crate::types::{MetricId, QueueId};
use serde::{Deserialize, Serialize};

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable per-call failures.
///
/// Each variant maps onto exactly one wire status at the foreign-call
/// boundary:
///
/// | Variant | Wire status |
/// |---------|-------------|
/// | `QueueNotFound`, `KeyNotFound` | `NotFound` |
/// | `QueueEmpty` | `Empty` |
/// | `CasMismatch` | `CasMismatch` |
/// | `UnknownMetric` | `BadArgument` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Enqueue or dequeue on a queue id that was never registered.
    #[error("queue not found: {id}")]
    QueueNotFound {
        /// The unregistered queue id.
        id: QueueId,
    },

    /// Dequeue on a registered queue with no pending entries.
    #[error("queue {id} is empty")]
    QueueEmpty {
        /// The registered but empty queue id.
        id: QueueId,
    },

    /// Shared-data read of a key that was never written.
    #[error("shared data key not found: {key}")]
    KeyNotFound {
        /// The unwritten key.
        key: String,
    },

    /// Shared-data write with a stale CAS counter.
    #[error("cas mismatch on '{key}': supplied {supplied}, current {current}")]
    CasMismatch {
        /// The contended key.
        key: String,
        /// CAS value the caller supplied.
        supplied: u32,
        /// CAS value currently stored.
        current: u32,
    },

    /// Metric operation on an id that was never defined.
    #[error("unknown metric id: {id}")]
    UnknownMetric {
        /// The undefined metric id.
        id: MetricId,
    },
}
