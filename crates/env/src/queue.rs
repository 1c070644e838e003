//! QueueRegistry: named, densely-numbered FIFO byte queues
//!
//! ## Design
//!
//! Queue ids are dense and sequential: registering the N+1th distinct name
//! yields id N, so ids double as indices into a `Vec` of queues. A name
//! registered twice returns the original id (idempotent) and leaves the
//! queue's contents alone.
//!
//! ## Asymmetry
//!
//! `enqueue`/`dequeue` on an unregistered id fail with `QueueNotFound`,
//! while `len` reports 0 for the same id. The emulated contract specifies
//! exactly this asymmetry; callers probe queue depth without registering.

use plughost_core::{Error, QueueId, Result};
use std::collections::{HashMap, VecDeque};

/// Registry of named FIFO byte queues.
#[derive(Debug, Default)]
pub struct QueueRegistry {
    queues: Vec<VecDeque<Vec<u8>>>,
    ids_by_name: HashMap<String, QueueId>,
}

impl QueueRegistry {
    /// Register `name`, creating an empty queue for a new name.
    /// Idempotent: an already-registered name returns its existing id.
    pub fn register(&mut self, name: &str) -> QueueId {
        if let Some(&id) = self.ids_by_name.get(name) {
            return id;
        }
        let id = QueueId::from_raw(self.queues.len() as u32);
        self.queues.push(VecDeque::new());
        self.ids_by_name.insert(name.to_owned(), id);
        tracing::debug!(queue = name, id = id.as_u32(), "registered shared queue");
        id
    }

    /// Look up a previously registered name without registering it.
    pub fn resolve(&self, name: &str) -> Option<QueueId> {
        self.ids_by_name.get(name).copied()
    }

    /// Append `payload` at the tail of queue `id`.
    pub fn enqueue(&mut self, id: QueueId, payload: Vec<u8>) -> Result<()> {
        let queue = self
            .queues
            .get_mut(id.index())
            .ok_or(Error::QueueNotFound { id })?;
        queue.push_back(payload);
        Ok(())
    }

    /// Remove and return the head of queue `id`.
    pub fn dequeue(&mut self, id: QueueId) -> Result<Vec<u8>> {
        let queue = self
            .queues
            .get_mut(id.index())
            .ok_or(Error::QueueNotFound { id })?;
        queue.pop_front().ok_or(Error::QueueEmpty { id })
    }

    /// Pending entry count for queue `id`; 0 for an unregistered id.
    pub fn len(&self, id: QueueId) -> usize {
        self.queues.get(id.index()).map_or(0, VecDeque::len)
    }
}
