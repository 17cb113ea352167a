#[allow(clippy::module_inception)]
mod config;
mod dispatch_config;
mod hotkeys_config;
mod store_config;

pub(crate) use {
    config::Config, dispatch_config::DispatchConfig, hotkeys_config::HotkeysConfig,
    store_config::StoreConfig,
};

pub(crate) const DEFAULT_GLOBAL_ENABLED: bool = true;
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
pub(crate) const DEFAULT_PAYLOAD_DELAY_MS: u64 = 100;
pub(crate) const DEFAULT_COOLDOWN_MS: u64 = 500;
pub(crate) const DEFAULT_SLOT_COUNT: u32 = 5;

pub(crate) fn default_global_enabled() -> bool {
    DEFAULT_GLOBAL_ENABLED
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub(crate) fn default_payload_delay_ms() -> u64 {
    DEFAULT_PAYLOAD_DELAY_MS
}

pub(crate) fn default_cooldown_ms() -> u64 {
    DEFAULT_COOLDOWN_MS
}

pub(crate) fn default_slot_ids() -> Vec<String> {
    (1..=DEFAULT_SLOT_COUNT).map(|n| n.to_string()).collect()
}
