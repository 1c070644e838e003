//! Construction options for a host environment.

use serde::{Deserialize, Serialize};

/// Options consumed once at [`HostEnvironment`] construction.
///
/// [`HostEnvironment`]: crate::HostEnvironment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Mirror captured plugin log messages to the diagnostic sink
    /// (`tracing` events at the corresponding severity). On by default;
    /// turn off for quiet test runs.
    pub mirror_logs: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self { mirror_logs: true }
    }
}
