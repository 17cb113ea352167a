//! `ActionBackend` implementation against the real OS.
//!
//! All methods are synchronous and blocking; the dispatcher calls them inside
//! `spawn_blocking`. Key replay creates a fresh `Enigo` per invocation because
//! `Enigo` is `!Send` and cannot be held across await points.

use crate::ModifierGuard;

use std::{panic::Location, thread, time::Duration};

use enigo::{Direction, Key, Keyboard};
use error_location::ErrorLocation;
use hotslot_core::{ActionBackend, CoreError, CoreResult};
use tracing::{debug, instrument};

/// Pause between synthesized key events so target applications keep up.
const KEY_EVENT_DELAY: Duration = Duration::from_millis(10);

/// OS-backed action implementation.
#[derive(Debug, Default)]
pub struct NativeActions;

impl NativeActions {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

impl ActionBackend for NativeActions {
    #[track_caller]
    fn open_file(&self, path: &str) -> CoreResult<()> {
        debug!(path, "Opening file with default handler");
        open::that_detached(path).map_err(|e| CoreError::ActionFailed {
            reason: format!("Failed to open {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[cfg(target_os = "windows")]
    #[track_caller]
    fn set_resolution(&self, width: u32, height: u32) -> CoreResult<()> {
        use winapi::um::wingdi::{DEVMODEA, DM_PELSHEIGHT, DM_PELSWIDTH};
        use winapi::um::winuser::{CDS_FULLSCREEN, ChangeDisplaySettingsA, DISP_CHANGE_SUCCESSFUL};

        debug!(width, height, "Changing display resolution");

        // SAFETY: DEVMODEA is a plain C struct; zeroed is its documented
        // initial state, and dmSize tells the API which revision we filled.
        let result = unsafe {
            let mut devmode: DEVMODEA = std::mem::zeroed();
            devmode.dmSize = std::mem::size_of::<DEVMODEA>() as u16;
            devmode.dmPelsWidth = width;
            devmode.dmPelsHeight = height;
            devmode.dmFields = DM_PELSWIDTH | DM_PELSHEIGHT;

            ChangeDisplaySettingsA(&mut devmode, CDS_FULLSCREEN)
        };

        if result != DISP_CHANGE_SUCCESSFUL {
            return Err(CoreError::ActionFailed {
                reason: format!("Failed to change resolution: code {}", result),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    #[cfg(not(target_os = "windows"))]
    #[track_caller]
    fn set_resolution(&self, _width: u32, _height: u32) -> CoreResult<()> {
        Err(CoreError::ActionFailed {
            reason: "Resolution changes are only supported on Windows".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn inject_keys(&self, keys: &[String]) -> CoreResult<()> {
        // The guard presses every modifier in the combo and releases them in
        // reverse order on drop, even if a click below fails.
        let mut guard = ModifierGuard::hold(keys)?;
        thread::sleep(KEY_EVENT_DELAY);

        for key in keys {
            let Some(code) = click_key(key) else {
                continue;
            };
            guard
                .enigo_mut()
                .key(code, Direction::Click)
                .map_err(|e| CoreError::ActionFailed {
                    reason: format!("Failed to click {:?}: {}", key, e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            thread::sleep(KEY_EVENT_DELAY);
        }

        Ok(())
    }

    #[cfg(target_os = "windows")]
    fn available_resolutions(&self) -> CoreResult<Vec<(u32, u32)>> {
        use winapi::um::wingdi::DEVMODEA;
        use winapi::um::winuser::EnumDisplaySettingsA;

        let mut resolutions: Vec<(u32, u32)> = Vec::new();
        let mut mode_num = 0;

        // SAFETY: each iteration hands the API a freshly zeroed DEVMODEA with
        // dmSize set; a zero return means the mode index ran out.
        loop {
            let filled = unsafe {
                let mut devmode: DEVMODEA = std::mem::zeroed();
                devmode.dmSize = std::mem::size_of::<DEVMODEA>() as u16;

                if EnumDisplaySettingsA(std::ptr::null(), mode_num, &mut devmode) == 0 {
                    None
                } else {
                    Some((devmode.dmPelsWidth, devmode.dmPelsHeight))
                }
            };

            match filled {
                Some(mode) => resolutions.push(mode),
                None => break,
            }
            mode_num += 1;
        }

        resolutions.sort_unstable();
        resolutions.dedup();

        Ok(resolutions)
    }

    #[cfg(not(target_os = "windows"))]
    #[track_caller]
    fn available_resolutions(&self) -> CoreResult<Vec<(u32, u32)>> {
        Err(CoreError::ActionFailed {
            reason: "Resolution enumeration is only supported on Windows".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Map a canonical non-modifier key name to the enigo key to click.
///
/// Modifier names return `None`; they are handled by the guard.
fn click_key(canonical: &str) -> Option<Key> {
    if crate::modifier_guard::modifier_for(canonical).is_some() {
        return None;
    }

    let key = match canonical {
        "enter" => Key::Return,
        "tab" => Key::Tab,
        "escape" => Key::Escape,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        "delete" => Key::Delete,
        #[cfg(not(target_os = "macos"))]
        "insert" => Key::Insert,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        c => {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Key::Unicode(ch),
                _ => return None,
            }
        }
    };

    Some(key)
}
