//! HostEnvironment: one lock over the five host services
//!
//! ## Locking
//!
//! Every entry point, mutating or reading, executes under a single
//! environment-wide `parking_lot::Mutex`. One lock for the whole
//! environment, not per-service locks: this is a correctness fixture, not
//! a throughput target. `parking_lot` does not poison, so a panicking
//! caller (including the fatal contract violations below) cannot wedge
//! other threads behind a poisoned lock.
//!
//! Each call acquires the lock once, touches exactly one service, and
//! releases on every exit path. Calls are atomic and all-or-nothing: an
//! error leaves no partial mutation behind.
//!
//! ## Fatal contract violations
//!
//! Two calls abort instead of returning a status:
//! - [`HostEnvironment::logs`] with a raw severity outside the enumerated
//!   range (a caller bug);
//! - [`HostEnvironment::buffer`], the deliberately unimplemented
//!   traffic-buffer capability.

use crate::config::EnvConfig;
use crate::log::LogStore;
use crate::metrics::MetricsRegistry;
use crate::queue::QueueRegistry;
use crate::shared_data::{SharedDataStore, SharedEntry};
use crate::tick::TickController;
use parking_lot::Mutex;
use plughost_core::{LogLevel, MetricId, MetricKind, QueueId, Result};

#[derive(Debug)]
struct HostState {
    logs: LogStore,
    tick: TickController,
    queues: QueueRegistry,
    shared_data: SharedDataStore,
    metrics: MetricsRegistry,
}

/// The emulated host: five services behind one lock.
///
/// Construct one per test, pass it (or an `Arc` of it) to whatever drives
/// the emulated entry points, and drop it afterward. Never a process-wide
/// singleton.
///
/// # Example
///
/// ```
/// use plughost_core::MetricKind;
/// use plughost_env::HostEnvironment;
///
/// let env = HostEnvironment::new();
/// let q = env.register_queue("events");
/// env.enqueue(q, b"payload".to_vec()).unwrap();
/// assert_eq!(env.dequeue(q).unwrap(), b"payload");
///
/// let m = env.define_metric("requests", MetricKind::Counter);
/// env.increment_metric(m, 1).unwrap();
/// assert_eq!(env.metric_value(m).unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct HostEnvironment {
    state: Mutex<HostState>,
}

impl HostEnvironment {
    /// Create an environment with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EnvConfig::default())
    }

    /// Create an environment with explicit options.
    pub fn with_config(config: EnvConfig) -> Self {
        tracing::debug!(mirror_logs = config.mirror_logs, "creating host environment");
        Self {
            state: Mutex::new(HostState {
                logs: LogStore::new(config.mirror_logs),
                tick: TickController::default(),
                queues: QueueRegistry::default(),
                shared_data: SharedDataStore::default(),
                metrics: MetricsRegistry::default(),
            }),
        }
    }

    // ========== Logging ==========

    /// Capture a plugin log message. Always succeeds.
    pub fn log(&self, level: LogLevel, message: &str) {
        self.state.lock().logs.record(level, message.to_owned());
    }

    /// Captured messages for a raw severity level, in insertion order.
    ///
    /// # Panics
    ///
    /// Aborts the test run for a raw level outside the enumerated range.
    /// That is a bug in the caller, not a runtime condition, and is never
    /// downgraded to a recoverable status.
    pub fn logs(&self, raw_level: u32) -> Vec<String> {
        let Some(level) = LogLevel::from_raw(raw_level) else {
            panic!("invalid log level: {raw_level}");
        };
        self.state.lock().logs.messages(level).to_vec()
    }

    // ========== Scheduling ==========

    /// Replace the stored scheduling-tick period.
    pub fn set_tick_period(&self, ms: u32) {
        self.state.lock().tick.set_period(ms);
    }

    /// The last stored tick period (0 until set).
    pub fn tick_period(&self) -> u32 {
        self.state.lock().tick.period()
    }

    // ========== Shared queues ==========

    /// Register a named queue; idempotent per name.
    pub fn register_queue(&self, name: &str) -> QueueId {
        self.state.lock().queues.register(name)
    }

    /// Id of a previously registered queue name, if any.
    pub fn queue_id(&self, name: &str) -> Option<QueueId> {
        self.state.lock().queues.resolve(name)
    }

    /// Append a payload at the tail of a queue.
    pub fn enqueue(&self, id: QueueId, payload: Vec<u8>) -> Result<()> {
        self.state.lock().queues.enqueue(id, payload)
    }

    /// Remove and return the head of a queue.
    pub fn dequeue(&self, id: QueueId) -> Result<Vec<u8>> {
        self.state.lock().queues.dequeue(id)
    }

    /// Pending entry count; 0 for an unregistered id.
    pub fn queue_len(&self, id: QueueId) -> usize {
        self.state.lock().queues.len(id)
    }

    // ========== Shared data ==========

    /// Current payload and CAS counter for a key, as one atomic pair.
    pub fn shared_data(&self, key: &str) -> Result<SharedEntry> {
        self.state.lock().shared_data.get(key)
    }

    /// CAS-guarded write; see [`SharedDataStore::set`].
    ///
    /// [`SharedDataStore::set`]: crate::shared_data::SharedDataStore::set
    pub fn set_shared_data(&self, key: &str, data: Vec<u8>, expected_cas: u32) -> Result<()> {
        self.state.lock().shared_data.set(key, data, expected_cas)
    }

    // ========== Metrics ==========

    /// Define a metric; idempotent per name, kind unvalidated.
    pub fn define_metric(&self, name: &str, kind: MetricKind) -> MetricId {
        self.state.lock().metrics.define(name, kind)
    }

    /// Add a signed delta with u64 wraparound.
    pub fn increment_metric(&self, id: MetricId, delta: i64) -> Result<()> {
        self.state.lock().metrics.increment(id, delta)
    }

    /// Overwrite a metric value absolutely.
    pub fn record_metric(&self, id: MetricId, value: u64) -> Result<()> {
        self.state.lock().metrics.record(id, value)
    }

    /// Current accumulated value.
    pub fn metric_value(&self, id: MetricId) -> Result<u64> {
        self.state.lock().metrics.value(id)
    }

    /// Kind declared at first definition.
    pub fn metric_kind(&self, id: MetricId) -> Result<MetricKind> {
        self.state.lock().metrics.kind(id)
    }

    // ========== Buffers ==========

    /// Access to intercepted traffic buffers is not emulated.
    ///
    /// # Panics
    ///
    /// Always. Invoking this capability is a fatal contract violation.
    pub fn buffer(&self, buffer_type: u32, start: usize, max_size: usize) -> ! {
        unimplemented!(
            "traffic buffer access (type {buffer_type}, start {start}, max {max_size})"
        )
    }
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
