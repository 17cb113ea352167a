use crate::config::default_poll_interval_ms;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Slot record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Interval between periodic re-reads of persisted slot records.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl StoreConfig {
    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
