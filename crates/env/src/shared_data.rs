//! SharedDataStore: key/value store with CAS-guarded writes
//!
//! ## CAS contract
//!
//! Every entry carries a compare-and-swap counter. A write must supply the
//! stored counter to be accepted; the accepted write stores
//! `supplied + 1`. Across accepted writes a key's counter therefore
//! strictly increases by exactly 1, which lets callers build
//! read-modify-write retry loops: read `(payload, cas)`, compute, write
//! with that `cas`. A concurrent winner makes the loser fail with
//! `CasMismatch` instead of silently overwriting.
//!
//! ## First write
//!
//! Creation always wins: a write to an absent key succeeds regardless of
//! the supplied counter and stores `supplied + 1`. No compare happens on
//! creation. The emulated contract specifies exactly this; the
//! conventional first write supplies 0 and observes 1.

use plughost_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payload and CAS counter of one shared-data key, returned as one
/// atomic pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedEntry {
    /// Opaque byte payload.
    pub data: Vec<u8>,
    /// CAS counter an accepting write must match.
    pub cas: u32,
}

/// CAS-guarded shared key/value store.
#[derive(Debug, Default)]
pub struct SharedDataStore {
    entries: HashMap<String, SharedEntry>,
}

impl SharedDataStore {
    /// Current payload and CAS counter for `key`.
    pub fn get(&self, key: &str) -> Result<SharedEntry> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| Error::KeyNotFound { key: key.to_owned() })
    }

    /// Write `data` under `key`, guarded by `expected_cas`.
    ///
    /// An absent key is created unconditionally. A present key is
    /// overwritten only when `expected_cas` matches the stored counter;
    /// otherwise nothing changes and `CasMismatch` is returned.
    pub fn set(&mut self, key: &str, data: Vec<u8>, expected_cas: u32) -> Result<()> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                if entry.cas != expected_cas {
                    return Err(Error::CasMismatch {
                        key: key.to_owned(),
                        supplied: expected_cas,
                        current: entry.cas,
                    });
                }
                entry.data = data;
                entry.cas = expected_cas.wrapping_add(1);
                Ok(())
            }
            None => {
                self.entries.insert(
                    key.to_owned(),
                    SharedEntry {
                        data,
                        cas: expected_cas.wrapping_add(1),
                    },
                );
                Ok(())
            }
        }
    }
}
