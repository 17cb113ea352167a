//! TOML-backed slot record store.
//!
//! One file per slot under the platform data directory, written with the same
//! temp-then-rename pattern as the configuration so a crash mid-write never
//! leaves a truncated record behind.

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use hotslot_core::{CoreError, CoreResult, SlotRecord, SlotStore};
use tracing::debug;

/// Filesystem slot store keeping `shortcuts-{id}.toml` files in one directory.
#[derive(Debug)]
pub struct TomlSlotStore {
    dir: PathBuf,
}

impl TomlSlotStore {
    /// Create a store rooted at the platform data directory.
    #[track_caller]
    pub fn new() -> CoreResult<Self> {
        let proj_dirs =
            ProjectDirs::from("com", "hotslot", "Hotslot").ok_or_else(|| {
                CoreError::StoreLoadFailed {
                    slot_id: String::new(),
                    reason: "Failed to get data directory".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        Ok(Self::with_dir(proj_dirs.data_dir().join("slots")))
    }

    /// Create a store rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, slot_id: &str) -> PathBuf {
        self.dir.join(format!("shortcuts-{}.toml", slot_id))
    }
}

impl SlotStore for TomlSlotStore {
    #[track_caller]
    fn load(&self, slot_id: &str) -> CoreResult<Option<SlotRecord>> {
        let path = self.record_path(slot_id);

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| CoreError::StoreLoadFailed {
            slot_id: slot_id.to_string(),
            reason: format!("Failed to read {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let record: SlotRecord =
            toml::from_str(&contents).map_err(|e| CoreError::StoreLoadFailed {
                slot_id: slot_id.to_string(),
                reason: format!("Failed to parse {:?}: {}", path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(slot_id, path = ?path, "Slot record loaded");

        Ok(Some(record))
    }

    #[track_caller]
    fn save(&self, slot_id: &str, record: &SlotRecord) -> CoreResult<()> {
        let path = self.record_path(slot_id);

        if let Some(parent) = path.parent() {
            create_dir(slot_id, parent)?;
        }

        let contents = toml::to_string_pretty(record).map_err(|e| CoreError::StoreSaveFailed {
            slot_id: slot_id.to_string(),
            reason: format!("Failed to serialize record: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file =
            fs::File::create(&temp_path).map_err(|e| CoreError::StoreSaveFailed {
                slot_id: slot_id.to_string(),
                reason: format!("Failed to create {:?}: {}", temp_path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| CoreError::StoreSaveFailed {
                slot_id: slot_id.to_string(),
                reason: format!("Failed to write {:?}: {}", temp_path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| CoreError::StoreSaveFailed {
            slot_id: slot_id.to_string(),
            reason: format!("Failed to sync {:?}: {}", temp_path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &path).map_err(|e| CoreError::StoreSaveFailed {
            slot_id: slot_id.to_string(),
            reason: format!("Failed to rename {:?} to {:?}: {}", temp_path, path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(slot_id, path = ?path, "Slot record saved (atomic write)");

        Ok(())
    }
}

#[track_caller]
fn create_dir(slot_id: &str, dir: &Path) -> CoreResult<()> {
    fs::create_dir_all(dir).map_err(|e| CoreError::StoreSaveFailed {
        slot_id: slot_id.to_string(),
        reason: format!("Failed to create {:?}: {}", dir, e),
        location: ErrorLocation::from(Location::caller()),
    })
}
