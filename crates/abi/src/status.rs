//! Numeric result codes of the emulated foreign-call contract.

use plughost_core::Error;
use serde::{Deserialize, Serialize};

/// Per-call result code returned across the foreign-call boundary.
///
/// The discriminants are the wire values of the emulated contract and
/// must not be renumbered. The gap between `BadArgument` and `Empty`
/// belongs to codes this emulation never produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Status {
    /// The call succeeded.
    Ok = 0,
    /// The named entity (queue id, shared-data key) does not exist.
    NotFound = 1,
    /// An argument (metric id) does not refer to a known entity.
    BadArgument = 2,
    /// The queue exists but holds no entries.
    Empty = 7,
    /// The supplied CAS counter is stale; nothing was written.
    CasMismatch = 8,
}

impl Status {
    /// The raw wire value of this status.
    pub fn as_raw(self) -> u32 {
        self as u32
    }

    /// Whether this status is `Ok`.
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl From<&Error> for Status {
    fn from(err: &Error) -> Self {
        match err {
            Error::QueueNotFound { .. } | Error::KeyNotFound { .. } => Status::NotFound,
            Error::QueueEmpty { .. } => Status::Empty,
            Error::CasMismatch { .. } => Status::CasMismatch,
            Error::UnknownMetric { .. } => Status::BadArgument,
        }
    }
}
