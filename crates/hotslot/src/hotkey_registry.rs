//! Accelerator parsing and the shared identifier ↔ hotkey registry.
//!
//! The registry is written by the main thread (which owns the
//! `GlobalHotKeyManager`) and read by the async event forwarder to map a
//! numeric hotkey event back to the slot identifier it was registered under.

use crate::{AppError, AppResult};

use std::{
    collections::HashMap,
    panic::Location,
    sync::{Mutex, MutexGuard},
};

use error_location::ErrorLocation;
use global_hotkey::hotkey::{Code, HotKey, Modifiers};

/// Identifier-keyed view of the live OS hotkey registrations.
#[derive(Debug, Default)]
pub struct HotkeyRegistry {
    inner: Mutex<HashMap<String, HotKey>>,
}

impl HotkeyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<String, HotKey>> {
        // A poisoned map is still structurally valid; recover it.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a live registration, returning the one it replaced, if any.
    pub fn insert(&self, identifier: &str, hotkey: HotKey) -> Option<HotKey> {
        self.guard().insert(identifier.to_string(), hotkey)
    }

    /// Drop a registration. Returns `None` when the identifier was unknown.
    pub fn remove(&self, identifier: &str) -> Option<HotKey> {
        self.guard().remove(identifier)
    }

    /// Resolve a hotkey event id back to the identifier it was bound under.
    pub fn identifier_for(&self, hotkey_id: u32) -> Option<String> {
        self.guard()
            .iter()
            .find(|(_, hotkey)| hotkey.id() == hotkey_id)
            .map(|(identifier, _)| identifier.clone())
    }
}

/// Parse an accelerator string (`"ctrl+shift+k"`) into an OS hotkey.
///
/// Accepts any number of modifier tokens and exactly one non-modifier key.
#[track_caller]
pub(crate) fn parse_accelerator(accelerator: &str) -> AppResult<HotKey> {
    let mut modifiers = Modifiers::empty();
    let mut key: Option<Code> = None;

    for part in accelerator.split('+').map(str::trim) {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= Modifiers::CONTROL,
            "shift" => modifiers |= Modifiers::SHIFT,
            "alt" => modifiers |= Modifiers::ALT,
            "meta" | "cmd" | "command" => modifiers |= Modifiers::SUPER,
            token => {
                if key.is_some() {
                    return Err(AppError::AcceleratorParseFailed {
                        reason: format!("Multiple non-modifier keys in {:?}", accelerator),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                key = Some(key_code(token).ok_or_else(|| AppError::AcceleratorParseFailed {
                    reason: format!("Unsupported key {:?}", token),
                    location: ErrorLocation::from(Location::caller()),
                })?);
            }
        }
    }

    let code = key.ok_or_else(|| AppError::AcceleratorParseFailed {
        reason: format!("No non-modifier key in {:?}", accelerator),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(HotKey::new(Some(modifiers), code))
}

fn key_code(token: &str) -> Option<Code> {
    if let Some(code) = named_code(token) {
        return Some(code);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => char_code(c),
        _ => None,
    }
}

fn named_code(token: &str) -> Option<Code> {
    let code = match token {
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "enter" => Code::Enter,
        "escape" | "esc" => Code::Escape,
        "space" => Code::Space,
        "tab" => Code::Tab,
        "backspace" => Code::Backspace,
        "delete" => Code::Delete,
        "insert" => Code::Insert,
        "home" => Code::Home,
        "end" => Code::End,
        "pageup" => Code::PageUp,
        "pagedown" => Code::PageDown,
        "up" | "arrowup" => Code::ArrowUp,
        "down" | "arrowdown" => Code::ArrowDown,
        "left" | "arrowleft" => Code::ArrowLeft,
        "right" | "arrowright" => Code::ArrowRight,
        _ => return None,
    };
    Some(code)
}

fn char_code(c: char) -> Option<Code> {
    let code = match c {
        'a' => Code::KeyA,
        'b' => Code::KeyB,
        'c' => Code::KeyC,
        'd' => Code::KeyD,
        'e' => Code::KeyE,
        'f' => Code::KeyF,
        'g' => Code::KeyG,
        'h' => Code::KeyH,
        'i' => Code::KeyI,
        'j' => Code::KeyJ,
        'k' => Code::KeyK,
        'l' => Code::KeyL,
        'm' => Code::KeyM,
        'n' => Code::KeyN,
        'o' => Code::KeyO,
        'p' => Code::KeyP,
        'q' => Code::KeyQ,
        'r' => Code::KeyR,
        's' => Code::KeyS,
        't' => Code::KeyT,
        'u' => Code::KeyU,
        'v' => Code::KeyV,
        'w' => Code::KeyW,
        'x' => Code::KeyX,
        'y' => Code::KeyY,
        'z' => Code::KeyZ,
        '0' => Code::Digit0,
        '1' => Code::Digit1,
        '2' => Code::Digit2,
        '3' => Code::Digit3,
        '4' => Code::Digit4,
        '5' => Code::Digit5,
        '6' => Code::Digit6,
        '7' => Code::Digit7,
        '8' => Code::Digit8,
        '9' => Code::Digit9,
        _ => return None,
    };
    Some(code)
}
