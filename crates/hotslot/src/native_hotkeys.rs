//! `HotkeyBackend` implementation backed by the main-thread event loop.
//!
//! The `GlobalHotKeyManager` is `!Send` on some platforms and must run where
//! the OS messages are pumped, so this backend only forwards registration
//! requests as user events. The main loop applies them against the manager
//! and mirrors the result into the shared [`HotkeyRegistry`].

use crate::ShellCommand;

use std::{panic::Location, sync::Mutex};

use error_location::ErrorLocation;
use hotslot_core::{CoreError, CoreResult, HotkeyBackend};
use tao::event_loop::EventLoopProxy;
use tracing::debug;

/// Forwards hotkey registration changes to the main thread.
pub struct NativeHotkeys {
    // EventLoopProxy is Send but not Sync; the backend is shared via Arc.
    proxy: Mutex<EventLoopProxy<ShellCommand>>,
}

impl NativeHotkeys {
    /// Wrap an event loop proxy as a hotkey backend.
    pub fn new(proxy: EventLoopProxy<ShellCommand>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }

    #[track_caller]
    fn send(&self, command: ShellCommand) -> CoreResult<()> {
        let proxy = self.proxy.lock().unwrap_or_else(|e| e.into_inner());
        proxy
            .send_event(command)
            .map_err(|e| CoreError::RegistrationFailed {
                reason: format!("Event loop is gone: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl HotkeyBackend for NativeHotkeys {
    fn register(&self, identifier: &str, accelerator: &str) -> CoreResult<()> {
        debug!(identifier, accelerator, "Forwarding hotkey registration");
        self.send(ShellCommand::RegisterHotkey {
            identifier: identifier.to_string(),
            accelerator: accelerator.to_string(),
        })
    }

    fn unregister(&self, identifier: &str) -> CoreResult<()> {
        debug!(identifier, "Forwarding hotkey release");
        self.send(ShellCommand::UnregisterHotkey {
            identifier: identifier.to_string(),
        })
    }
}
