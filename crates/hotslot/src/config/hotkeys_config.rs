use crate::config::{default_global_enabled, default_slot_ids};

use serde::{Deserialize, Serialize};

/// Global hotkey and slot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeysConfig {
    /// Whether global hotkeys are registered at all.
    #[serde(default = "default_global_enabled")]
    pub global_enabled: bool,
    /// Slot ids to activate.
    #[serde(default = "default_slot_ids")]
    pub slots: Vec<String>,
}

impl Default for HotkeysConfig {
    fn default() -> Self {
        Self {
            global_enabled: default_global_enabled(),
            slots: default_slot_ids(),
        }
    }
}
