use std::panic::Location;

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use error_location::ErrorLocation;
use hotslot_core::{CoreError, CoreResult};

/// Map a canonical modifier name to its enigo key, if it is a modifier.
pub(crate) fn modifier_for(canonical: &str) -> Option<Key> {
    match canonical {
        "control" => Some(Key::Control),
        "shift" => Some(Key::Shift),
        "alt" => Some(Key::Alt),
        "meta" => Some(Key::Meta),
        _ => None,
    }
}

/// RAII guard that guarantees held modifier keys are released when dropped.
///
/// Prevents stuck keyboard if operations between key press and release fail
/// or panic.
///
/// Owns the `Enigo` instance so all keyboard operations go through it.
/// On drop, releases the modifiers in reverse order with best-effort
/// semantics -- if a release fails, the OS will reset modifier state on the
/// next physical key press/release by the user.
pub struct ModifierGuard {
    enigo: Enigo,
    held: Vec<Key>,
}

impl ModifierGuard {
    /// Press the given modifiers in order and return a guard that will
    /// release them on drop. Non-modifier names are ignored.
    #[track_caller]
    pub(crate) fn hold(canonical_keys: &[String]) -> CoreResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| CoreError::ActionFailed {
            reason: format!("Failed to create Enigo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let mut guard = Self {
            enigo,
            held: Vec::new(),
        };

        for key in canonical_keys.iter().filter_map(|k| modifier_for(k)) {
            guard
                .enigo
                .key(key, Direction::Press)
                .map_err(|e| CoreError::ActionFailed {
                    reason: format!("Failed to press modifier: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            // Recorded only once pressed so drop releases exactly what is held.
            guard.held.push(key);
        }

        Ok(guard)
    }

    /// Access the underlying Enigo for key operations while modifiers are held.
    pub(crate) fn enigo_mut(&mut self) -> &mut Enigo {
        &mut self.enigo
    }
}

impl Drop for ModifierGuard {
    fn drop(&mut self) {
        for key in self.held.iter().rev() {
            let _ = self.enigo.key(*key, Direction::Release);
        }
    }
}
