//! Hotslot: slot-based key combo capture with global hotkey replay.

mod app;
mod config;
mod error;
mod hotkey_registry;
mod modifier_guard;
mod native_actions;
mod native_hotkeys;
mod shell_command;
mod store_file;
#[cfg(test)]
mod tests;
mod tray_manager;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
    hotkey_registry::HotkeyRegistry,
    modifier_guard::ModifierGuard,
    native_actions::NativeActions,
    native_hotkeys::NativeHotkeys,
    shell_command::ShellCommand,
    store_file::TomlSlotStore,
    tray_manager::TrayManager,
};

use crate::{config::Config, hotkey_registry::parse_accelerator};

use std::sync::Arc;

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tracing::{debug, error, info};

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("hotslot=debug")
        .init();

    let event_loop = EventLoopBuilder::<ShellCommand>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new(config.hotkeys.global_enabled) {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Shared with the async side so hotkey events map back to identifiers.
    let registry = Arc::new(HotkeyRegistry::new());

    // Persists across event loop iterations — dropping it unregisters every hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;

    let mut config = Some(config);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    ShellCommand::RegisterHotkey {
                        identifier,
                        accelerator,
                    } => {
                        if let Some(manager) = &hotkey_manager {
                            handle_register(manager, &registry, &identifier, &accelerator);
                        }
                    }
                    ShellCommand::UnregisterHotkey { identifier } => {
                        if let Some(manager) = &hotkey_manager {
                            handle_unregister(manager, &registry, &identifier);
                        }
                    }
                    ShellCommand::SetEnabled(enabled) => {
                        tray_manager.set_enabled(enabled);
                    }
                    ShellCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let Some(config) = config.take() else {
                    return;
                };

                // The manager must be created on the thread pumping OS
                // messages — tao's event loop delivers the WM_HOTKEY traffic
                // it depends on.
                let manager = match GlobalHotKeyManager::new() {
                    Ok(m) => m,
                    Err(e) => {
                        error!("Failed to create hotkey manager: {:?}", e);
                        std::process::exit(1);
                    }
                };
                hotkey_manager = Some(manager);

                let store = match TomlSlotStore::new() {
                    Ok(s) => Arc::new(s),
                    Err(e) => {
                        error!("Failed to create slot store: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let app = App {
                    config,
                    store,
                    actions: Arc::new(NativeActions::new()),
                    hotkeys: Arc::new(NativeHotkeys::new(proxy.clone())),
                    registry: Arc::clone(&registry),
                    proxy: proxy.clone(),
                    toggle_menu_id: tray_manager.toggle_item_id().clone(),
                    exit_menu_id: tray_manager.exit_item_id().clone(),
                };

                // Spawn tokio runtime on separate thread.
                // TrayManager and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        if let Err(e) = app.run().await {
                            error!(error = ?e, "App error");
                        }
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}

/// Apply a registration on the main thread, superseding any previous binding
/// for the identifier.
///
/// An OS denial (accelerator owned by another process, unparsable string)
/// leaves the binding inert; it is retried only when the slot's inputs change.
fn handle_register(
    manager: &GlobalHotKeyManager,
    registry: &HotkeyRegistry,
    identifier: &str,
    accelerator: &str,
) {
    let hotkey = match parse_accelerator(accelerator) {
        Ok(hk) => hk,
        Err(e) => {
            error!(identifier, accelerator, error = ?e, "Binding left inert");
            return;
        }
    };

    if let Some(previous) = registry.remove(identifier) {
        if let Err(e) = manager.unregister(previous) {
            error!(identifier, error = ?e, "Failed to release superseded binding");
        }
    }

    if let Err(e) = manager.register(hotkey) {
        error!(identifier, accelerator, error = ?e, "OS rejected hotkey, binding left inert");
        return;
    }

    registry.insert(identifier, hotkey);
    info!(identifier, accelerator, "Hotkey registered");
}

/// Release a binding on the main thread. Unknown identifiers are a no-op.
fn handle_unregister(manager: &GlobalHotKeyManager, registry: &HotkeyRegistry, identifier: &str) {
    let Some(hotkey) = registry.remove(identifier) else {
        debug!(identifier, "No binding to release");
        return;
    };

    if let Err(e) = manager.unregister(hotkey) {
        error!(identifier, error = ?e, "Failed to release binding");
        return;
    }

    info!(identifier, "Hotkey released");
}
