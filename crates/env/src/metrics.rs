//! MetricsRegistry: name→id metric definitions with accumulated values
//!
//! ## Design
//!
//! Metric ids are dense and sequential in definition order, like queue
//! ids. Defining an existing name returns its stored id; the supplied kind
//! is not compared against the stored one and the accumulated value is not
//! reset. The emulated contract is permissive here and stays permissive.
//!
//! ## Arithmetic
//!
//! `increment` adds a signed delta to the unsigned value with fixed-width
//! wraparound: the delta is reinterpreted as `u64` and added with
//! `wrapping_add`, so negative deltas subtract modulo 2^64 and overflow
//! wraps instead of erroring.

use plughost_core::{Error, MetricId, MetricKind, Result};
use std::collections::HashMap;

#[derive(Debug)]
struct MetricSlot {
    kind: MetricKind,
    value: u64,
}

/// Registry of defined metrics and their accumulated values.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    ids_by_name: HashMap<String, MetricId>,
    slots: Vec<MetricSlot>,
}

impl MetricsRegistry {
    /// Define `name` with `kind`, or return the existing id for an
    /// already-defined name (kind ignored, value untouched).
    pub fn define(&mut self, name: &str, kind: MetricKind) -> MetricId {
        if let Some(&id) = self.ids_by_name.get(name) {
            return id;
        }
        let id = MetricId::from_raw(self.slots.len() as u32);
        self.slots.push(MetricSlot { kind, value: 0 });
        self.ids_by_name.insert(name.to_owned(), id);
        tracing::debug!(metric = name, id = id.as_u32(), %kind, "defined metric");
        id
    }

    /// Add `delta` to the stored value with u64 wraparound.
    pub fn increment(&mut self, id: MetricId, delta: i64) -> Result<()> {
        let slot = self.slot_mut(id)?;
        slot.value = slot.value.wrapping_add(delta as u64);
        Ok(())
    }

    /// Overwrite the stored value unconditionally, whatever the kind.
    pub fn record(&mut self, id: MetricId, value: u64) -> Result<()> {
        self.slot_mut(id)?.value = value;
        Ok(())
    }

    /// Current accumulated value for `id`.
    pub fn value(&self, id: MetricId) -> Result<u64> {
        self.slot(id).map(|slot| slot.value)
    }

    /// Kind declared at first definition of `id`.
    pub fn kind(&self, id: MetricId) -> Result<MetricKind> {
        self.slot(id).map(|slot| slot.kind)
    }

    fn slot(&self, id: MetricId) -> Result<&MetricSlot> {
        self.slots.get(id.index()).ok_or(Error::UnknownMetric { id })
    }

    fn slot_mut(&mut self, id: MetricId) -> Result<&mut MetricSlot> {
        self.slots
            .get_mut(id.index())
            .ok_or(Error::UnknownMetric { id })
    }
}
