/// Commands delivered to the main thread's event loop.
///
/// The `GlobalHotKeyManager` must live on the thread pumping OS messages, so
/// registration changes travel here as user events instead of being issued
/// from the async runtime.
#[derive(Debug, Clone)]
pub enum ShellCommand {
    /// Bind an OS-wide hotkey under an identifier, superseding any previous
    /// binding for that identifier.
    RegisterHotkey {
        /// Slot registration identifier.
        identifier: String,
        /// Accelerator string, e.g. `"ctrl+shift+k"`.
        accelerator: String,
    },
    /// Release the binding for an identifier. Idempotent.
    UnregisterHotkey {
        /// Slot registration identifier.
        identifier: String,
    },
    /// Mirror the global enable flag into the tray menu.
    SetEnabled(bool),
    /// Request application shutdown.
    Shutdown,
}
