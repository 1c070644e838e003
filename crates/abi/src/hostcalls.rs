//! Raw entry points in the plugin-side calling convention.
//!
//! ## Memory model
//!
//! Inbound payloads are copied out of the caller's memory before the
//! environment sees them; the core operates on owned values only.
//! Outbound payloads (dequeued entries, shared-data reads) are retained by
//! the adapter and stay valid for the adapter's lifetime, matching the
//! environment-lifetime memory model of the emulated host. There is no
//! free protocol.
//!
//! ## Out-parameters
//!
//! Out-parameters are written only when the call returns [`Status::Ok`];
//! on any other status their contents are untouched.

use crate::status::Status;
use parking_lot::Mutex;
use plughost_core::{LogLevel, MetricId, MetricKind, QueueId};
use plughost_env::HostEnvironment;
use std::sync::Arc;

/// Copy `len` bytes out of the caller's memory.
///
/// # Safety
///
/// `data` must be valid for reading `len` bytes unless `len` is 0.
unsafe fn read_bytes(data: *const u8, len: usize) -> Vec<u8> {
    if len == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(data, len).to_vec()
}

/// Copy a text argument out of the caller's memory. Invalid UTF-8 is
/// replaced rather than rejected; the contract treats names and keys as
/// opaque text.
///
/// # Safety
///
/// Same as [`read_bytes`].
unsafe fn read_string(data: *const u8, len: usize) -> String {
    String::from_utf8_lossy(&read_bytes(data, len)).into_owned()
}

/// The foreign-call adapter: one raw entry point per host operation.
///
/// Owns a shared reference to the environment it adapts. Construct one per
/// environment under test; both are dropped together at the end of the
/// test.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use plughost_abi::{HostCalls, Status};
/// use plughost_env::HostEnvironment;
///
/// let calls = HostCalls::new(Arc::new(HostEnvironment::new()));
/// let name = b"events";
/// let mut id = 0u32;
/// let status = unsafe { calls.register_shared_queue(name.as_ptr(), name.len(), &mut id) };
/// assert_eq!(status, Status::Ok);
/// assert_eq!(id, 0);
/// ```
pub struct HostCalls {
    env: Arc<HostEnvironment>,
    // Buffers handed to the caller; kept alive until the adapter drops.
    retained: Mutex<Vec<Box<[u8]>>>,
}

impl HostCalls {
    /// Create an adapter over `env`.
    pub fn new(env: Arc<HostEnvironment>) -> Self {
        Self {
            env,
            retained: Mutex::new(Vec::new()),
        }
    }

    /// The adapted environment.
    pub fn environment(&self) -> &Arc<HostEnvironment> {
        &self.env
    }

    /// Retain `bytes` and write its address and length through the
    /// out-parameters.
    ///
    /// # Safety
    ///
    /// `out_data` and `out_len` must be valid for writing.
    unsafe fn yield_bytes(&self, bytes: Vec<u8>, out_data: *mut *const u8, out_len: *mut usize) {
        let boxed = bytes.into_boxed_slice();
        let ptr = boxed.as_ptr();
        let len = boxed.len();
        self.retained.lock().push(boxed);
        *out_data = ptr;
        *out_len = len;
    }

    // ========== Logging ==========

    /// Capture a plugin log message at `level`.
    ///
    /// # Panics
    ///
    /// Aborts on a raw level outside the enumerated range (a caller bug).
    ///
    /// # Safety
    ///
    /// `message_data` must be valid for reading `message_size` bytes.
    pub unsafe fn log(&self, level: u32, message_data: *const u8, message_size: usize) -> Status {
        let Some(level) = LogLevel::from_raw(level) else {
            panic!("invalid log level: {level}");
        };
        let message = read_string(message_data, message_size);
        self.env.log(level, &message);
        Status::Ok
    }

    // ========== Scheduling ==========

    /// Replace the stored scheduling-tick period.
    pub fn set_tick_period_milliseconds(&self, period: u32) -> Status {
        self.env.set_tick_period(period);
        Status::Ok
    }

    // ========== Shared queues ==========

    /// Register a named queue and write its id through `return_id`.
    ///
    /// # Safety
    ///
    /// `name_data` must be valid for reading `name_size` bytes and
    /// `return_id` must be valid for writing.
    pub unsafe fn register_shared_queue(
        &self,
        name_data: *const u8,
        name_size: usize,
        return_id: *mut u32,
    ) -> Status {
        let name = read_string(name_data, name_size);
        let id = self.env.register_queue(&name);
        *return_id = id.as_u32();
        Status::Ok
    }

    /// Append a payload at the tail of queue `queue_id`.
    ///
    /// # Safety
    ///
    /// `value_data` must be valid for reading `value_size` bytes.
    pub unsafe fn enqueue_shared_queue(
        &self,
        queue_id: u32,
        value_data: *const u8,
        value_size: usize,
    ) -> Status {
        let payload = read_bytes(value_data, value_size);
        match self.env.enqueue(QueueId::from_raw(queue_id), payload) {
            Ok(()) => Status::Ok,
            Err(err) => {
                tracing::debug!(%err, "enqueue rejected");
                Status::from(&err)
            }
        }
    }

    /// Remove the head of queue `queue_id` and hand it back through the
    /// out-parameters.
    ///
    /// # Safety
    ///
    /// `return_value_data` and `return_value_size` must be valid for
    /// writing. The returned address stays valid for the adapter's
    /// lifetime.
    pub unsafe fn dequeue_shared_queue(
        &self,
        queue_id: u32,
        return_value_data: *mut *const u8,
        return_value_size: *mut usize,
    ) -> Status {
        match self.env.dequeue(QueueId::from_raw(queue_id)) {
            Ok(payload) => {
                self.yield_bytes(payload, return_value_data, return_value_size);
                Status::Ok
            }
            Err(err) => {
                tracing::debug!(%err, "dequeue rejected");
                Status::from(&err)
            }
        }
    }

    // ========== Shared data ==========

    /// Read a key's payload and CAS counter.
    ///
    /// # Safety
    ///
    /// `key_data` must be valid for reading `key_size` bytes;
    /// `return_value_data`, `return_value_size`, and `return_cas` must be
    /// valid for writing. The returned address stays valid for the
    /// adapter's lifetime.
    pub unsafe fn get_shared_data(
        &self,
        key_data: *const u8,
        key_size: usize,
        return_value_data: *mut *const u8,
        return_value_size: *mut usize,
        return_cas: *mut u32,
    ) -> Status {
        let key = read_string(key_data, key_size);
        match self.env.shared_data(&key) {
            Ok(entry) => {
                self.yield_bytes(entry.data, return_value_data, return_value_size);
                *return_cas = entry.cas;
                Status::Ok
            }
            Err(err) => Status::from(&err),
        }
    }

    /// CAS-guarded write of a key.
    ///
    /// # Safety
    ///
    /// `key_data` must be valid for reading `key_size` bytes and
    /// `value_data` for `value_size` bytes.
    pub unsafe fn set_shared_data(
        &self,
        key_data: *const u8,
        key_size: usize,
        value_data: *const u8,
        value_size: usize,
        cas: u32,
    ) -> Status {
        let key = read_string(key_data, key_size);
        let value = read_bytes(value_data, value_size);
        match self.env.set_shared_data(&key, value, cas) {
            Ok(()) => Status::Ok,
            Err(err) => {
                tracing::debug!(%err, "shared data write rejected");
                Status::from(&err)
            }
        }
    }

    // ========== Metrics ==========

    /// Define a metric and write its id through `return_metric_id`.
    ///
    /// # Panics
    ///
    /// Aborts on a raw kind outside the enumerated range (a caller bug).
    ///
    /// # Safety
    ///
    /// `name_data` must be valid for reading `name_size` bytes and
    /// `return_metric_id` must be valid for writing.
    pub unsafe fn define_metric(
        &self,
        metric_kind: u32,
        name_data: *const u8,
        name_size: usize,
        return_metric_id: *mut u32,
    ) -> Status {
        let Some(kind) = MetricKind::from_raw(metric_kind) else {
            panic!("invalid metric kind: {metric_kind}");
        };
        let name = read_string(name_data, name_size);
        let id = self.env.define_metric(&name, kind);
        *return_metric_id = id.as_u32();
        Status::Ok
    }

    /// Add a signed delta to a metric with u64 wraparound.
    pub fn increment_metric(&self, metric_id: u32, offset: i64) -> Status {
        match self.env.increment_metric(MetricId::from_raw(metric_id), offset) {
            Ok(()) => Status::Ok,
            Err(err) => Status::from(&err),
        }
    }

    /// Overwrite a metric value absolutely.
    pub fn record_metric(&self, metric_id: u32, value: u64) -> Status {
        match self.env.record_metric(MetricId::from_raw(metric_id), value) {
            Ok(()) => Status::Ok,
            Err(err) => Status::from(&err),
        }
    }

    /// Read a metric value through `return_value`.
    ///
    /// # Safety
    ///
    /// `return_value` must be valid for writing.
    pub unsafe fn get_metric(&self, metric_id: u32, return_value: *mut u64) -> Status {
        match self.env.metric_value(MetricId::from_raw(metric_id)) {
            Ok(value) => {
                *return_value = value;
                Status::Ok
            }
            Err(err) => Status::from(&err),
        }
    }

    // ========== Buffers ==========

    /// Access to intercepted traffic buffers is not emulated.
    ///
    /// # Panics
    ///
    /// Always. Invoking this capability is a fatal contract violation.
    ///
    /// # Safety
    ///
    /// Trivially safe: aborts before touching the out-parameters.
    pub unsafe fn get_buffer_bytes(
        &self,
        buffer_type: u32,
        start: usize,
        max_size: usize,
        _return_data: *mut *const u8,
        _return_size: *mut usize,
    ) -> Status {
        self.env.buffer(buffer_type, start, max_size)
    }
}
