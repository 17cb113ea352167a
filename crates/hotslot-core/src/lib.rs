//! Hotslot Core Library
//!
//! Key-combo capture and global-hotkey lifecycle coordination. Each slot
//! binds an action (open a file, change display resolution, replay a key
//! chord) to an optional payload combo and an optional system-wide trigger
//! combo. The native collaborators — the persisted record store, the OS
//! hotkey subsystem, and the commands that actually perform actions — are
//! traits implemented by the embedding shell.
//!
//! # Example
//!
//! ```no_run
//! use hotslot_core::{ComboKind, ComboRecorder, format_combo};
//!
//! let mut recorder = ComboRecorder::new(ComboKind::Trigger);
//! recorder.start();
//! recorder.key_down("Control");
//! recorder.key_down("Shift");
//! recorder.key_down("K");
//! let combo = recorder.stop();
//!
//! assert_eq!(format_combo(&combo, "+"), "control+shift+k");
//! ```

mod dispatch;
mod error;
mod hotkeys;
mod keys;
mod recorder;
mod slot;
mod store;

pub use {
    dispatch::{ActionBackend, ActionDispatcher, DispatchTimings, ExecState},
    error::{CoreError, Result as CoreResult},
    hotkeys::{HotkeyBackend, SlotHotkey},
    keys::{accelerator, accelerator_token, canonicalize, dedup_canonical, format_combo},
    recorder::{ComboKind, ComboRecorder},
    slot::{Resolution, Slot, SlotAction, SlotRecord},
    store::{SlotCommand, SlotHandle, SlotStore, SlotWorker},
};

#[cfg(test)]
mod tests;
