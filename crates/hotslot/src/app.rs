use crate::{
    AppResult, HotkeyRegistry, NativeActions, NativeHotkeys, ShellCommand, TomlSlotStore,
    config::Config,
};

use std::{sync::Arc, time::Duration};

use global_hotkey::{GlobalHotKeyEvent, HotKeyState};
use hotslot_core::{ActionBackend, ActionDispatcher, SlotHandle, SlotHotkey, SlotWorker};
use tao::event_loop::EventLoopProxy;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{error, info, instrument, warn};
use tray_icon::menu::{MenuEvent, MenuId};

/// Grace period for slot tasks to push their final unregistrations through
/// the event loop proxy before we ask the main thread to exit.
const TEARDOWN_GRACE: Duration = Duration::from_millis(200);

/// Main application state.
///
/// Runs on the async runtime thread. Hotkey registrations and tray updates
/// travel back to the main thread via `proxy` because both the
/// `GlobalHotKeyManager` and `TrayIcon` must remain on the UI thread.
pub struct App {
    pub(crate) config: Config,
    pub(crate) store: Arc<TomlSlotStore>,
    pub(crate) actions: Arc<NativeActions>,
    pub(crate) hotkeys: Arc<NativeHotkeys>,
    pub(crate) registry: Arc<HotkeyRegistry>,
    pub(crate) proxy: EventLoopProxy<ShellCommand>,
    pub(crate) toggle_menu_id: MenuId,
    pub(crate) exit_menu_id: MenuId,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Hotslot starting");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (enabled_tx, enabled_rx) = watch::channel(self.config.hotkeys.global_enabled);
        let (triggers_tx, _) = broadcast::channel(32);

        // One worker and one hotkey lifecycle task per configured slot.
        // The handles keep the workers' command channels open; dropping them
        // all is an alternative shutdown path the workers also honor.
        let mut handles: Vec<SlotHandle> = Vec::new();
        for slot_id in &self.config.hotkeys.slots {
            let (worker, handle) = SlotWorker::new(
                slot_id.clone(),
                Arc::clone(&self.store),
                self.config.store.poll_interval(),
                shutdown_rx.clone(),
            );
            tokio::spawn(worker.run());

            let dispatcher = ActionDispatcher::new(
                slot_id.clone(),
                Arc::clone(&self.actions),
                self.config.dispatch.timings(),
            );
            let lifecycle = SlotHotkey::new(
                slot_id,
                Arc::clone(&self.hotkeys),
                dispatcher,
                handle.state.clone(),
                enabled_rx.clone(),
                triggers_tx.clone(),
            );
            tokio::spawn(lifecycle.run(shutdown_rx.clone()));

            handles.push(handle);
        }

        self.audit_resolutions(&mut handles).await;

        // Hotkey event forwarding via single persistent blocking task.
        //
        // GlobalHotKeyEvent::receiver() returns a crossbeam_channel::Receiver
        // which HAS blocking recv() -- zero polling, instant response, one
        // thread. Shutdown: when hotkey_event_rx is dropped (main loop
        // breaks), blocking_send() fails, breaking the blocking loop.
        let (hotkey_event_tx, mut hotkey_event_rx) = mpsc::channel(32);
        let hotkey_handle = tokio::task::spawn_blocking(move || {
            let receiver = GlobalHotKeyEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if hotkey_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        // Same pattern for tray menu events.
        let (menu_event_tx, mut menu_event_rx) = mpsc::channel(32);
        let menu_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if menu_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = hotkey_event_rx.recv() => {
                    if event.state != HotKeyState::Pressed {
                        continue;
                    }
                    match self.registry.identifier_for(event.id) {
                        Some(identifier) => {
                            // No receivers just means every slot is idle or
                            // disabled right now.
                            let _ = triggers_tx.send(identifier);
                        }
                        None => warn!(hotkey_id = event.id, "Hotkey event for unknown binding"),
                    }
                }

                Some(event) = menu_event_rx.recv() => {
                    if event.id == self.toggle_menu_id {
                        let enabled = !*enabled_tx.borrow();
                        info!(enabled, "Global hotkeys toggled from tray menu");

                        let _ = enabled_tx.send(enabled);
                        let _ = self.proxy.send_event(ShellCommand::SetEnabled(enabled));

                        self.config.hotkeys.global_enabled = enabled;
                        if let Err(e) = self.config.save() {
                            error!(error = ?e, "Failed to persist enable flag");
                        }
                    } else if event.id == self.exit_menu_id {
                        info!("Exit requested from tray menu");
                        break;
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(hotkey_event_rx);
        drop(menu_event_rx);

        let _ = shutdown_tx.send(true);

        // Slot tasks unregister their bindings on the way out; give those
        // proxy events a moment to reach the main thread before it exits.
        tokio::time::sleep(TEARDOWN_GRACE).await;

        for (name, handle) in [("hotkey", hotkey_handle), ("menu", menu_handle)] {
            match tokio::time::timeout(Duration::from_secs(1), handle).await {
                Ok(Ok(())) => info!(forwarder = name, "Event forwarder stopped cleanly"),
                Ok(Err(e)) => error!(forwarder = name, error = ?e, "Event forwarder panicked"),
                Err(_) => info!(
                    forwarder = name,
                    "Event forwarder did not stop within timeout, \
                         will be cleaned up on exit"
                ),
            }
        }

        let _ = self.proxy.send_event(ShellCommand::Shutdown);
        info!("Hotslot shut down successfully");

        Ok(())
    }

    /// Warn about configured resolutions the primary display cannot take.
    ///
    /// Best-effort: enumeration failures (or non-Windows hosts) only log.
    #[instrument(skip_all)]
    async fn audit_resolutions(&self, handles: &mut [SlotHandle]) {
        let actions = Arc::clone(&self.actions);
        let supported =
            match tokio::task::spawn_blocking(move || actions.available_resolutions()).await {
                Ok(Ok(modes)) => modes,
                Ok(Err(e)) => {
                    warn!(error = ?e, "Could not enumerate display modes, skipping audit");
                    return;
                }
                Err(e) => {
                    error!(error = ?e, "Display mode enumeration task panicked");
                    return;
                }
            };

        for handle in handles {
            let Ok(slot) = handle.state.wait_for(|s| s.initialized).await else {
                continue;
            };
            let slot = slot.clone();

            if slot.resolution.is_empty() {
                continue;
            }
            match hotslot_core::Resolution::parse(&slot.resolution) {
                Some(res) if supported.contains(&(res.width, res.height)) => {}
                Some(res) => warn!(
                    slot_id = %slot.id,
                    width = res.width,
                    height = res.height,
                    "Configured resolution is not supported by the display"
                ),
                None => warn!(
                    slot_id = %slot.id,
                    resolution = %slot.resolution,
                    "Configured resolution does not parse"
                ),
            }
        }
    }
}
