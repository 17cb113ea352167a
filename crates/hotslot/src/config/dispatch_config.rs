use crate::config::{default_cooldown_ms, default_payload_delay_ms};

use std::time::Duration;

use hotslot_core::DispatchTimings;
use serde::{Deserialize, Serialize};

/// Action dispatch timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Delay before replaying the payload combo, in milliseconds.
    #[serde(default = "default_payload_delay_ms")]
    pub payload_delay_ms: u64,
    /// Cool-down held after an execution, in milliseconds.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl DispatchConfig {
    /// Project into the core dispatcher's timing knobs.
    pub fn timings(&self) -> DispatchTimings {
        DispatchTimings {
            payload_delay: Duration::from_millis(self.payload_delay_ms),
            cooldown: Duration::from_millis(self.cooldown_ms),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            payload_delay_ms: default_payload_delay_ms(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}
