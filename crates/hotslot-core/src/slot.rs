//! Slot data model: the in-memory binding and its persisted record.

use crate::keys;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The action a slot performs when triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    /// Open a file with the OS default handler.
    OpenFile,
    /// Change the display resolution.
    SetResolution,
    /// Replay the slot's payload key combo.
    ReplayKeys,
}

impl SlotAction {
    /// The string tag used in the persisted record.
    pub fn tag(&self) -> &'static str {
        match self {
            SlotAction::OpenFile => "open file",
            SlotAction::SetResolution => "resolutions",
            SlotAction::ReplayKeys => "key",
        }
    }

    /// Parse a persisted tag. Unknown or empty tags map to no action.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "open file" => Some(SlotAction::OpenFile),
            "resolutions" => Some(SlotAction::SetResolution),
            "key" => Some(SlotAction::ReplayKeys),
            _ => None,
        }
    }
}

/// A display resolution parsed from the persisted `"WxH"` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Parse `"1920x1080"` style strings. Returns `None` for anything that
    /// is not two positive integers separated by `x`.
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.split_once('x')?;
        Some(Self {
            width: w.trim().parse().ok()?,
            height: h.trim().parse().ok()?,
        })
    }
}

/// The persisted record for one slot, keyed by slot id in the store.
///
/// Field names match the record layout shared with other views of the same
/// slot, so external edits reconcile cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Action tag: `"open file"`, `"resolutions"`, `"key"`, or empty.
    #[serde(default, rename = "selectedOption")]
    pub selected_option: String,
    /// Resolution as `"WxH"`, or empty.
    #[serde(default, rename = "selectedResolution")]
    pub selected_resolution: String,
    /// Payload combo key names.
    #[serde(default)]
    pub keys: Vec<String>,
    /// Trigger combo key names.
    #[serde(default, rename = "keysBind")]
    pub keys_bind: Vec<String>,
    /// File path for the open-file action, or empty.
    #[serde(default, rename = "filePath")]
    pub file_path: String,
}

/// In-memory state of one configurable binding.
///
/// Owned by the slot's store-sync worker; other components hold cached,
/// eventually-consistent copies published on a watch channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Slot id (`"1"`..`"5"` in the default configuration).
    pub id: String,
    /// Configured action, if any.
    pub action: Option<SlotAction>,
    /// Resolution string (`"WxH"`), meaningful when action is `SetResolution`.
    pub resolution: String,
    /// File path, meaningful when action is `OpenFile`.
    pub file_path: String,
    /// Canonical payload combo, deduped, insertion order preserved.
    pub payload_keys: Vec<String>,
    /// Canonical trigger combo, deduped, insertion order preserved.
    pub trigger_keys: Vec<String>,
    /// Whether the initial load has completed for this slot.
    pub initialized: bool,
}

impl Slot {
    /// An uninitialized slot with defaults.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action: None,
            resolution: String::new(),
            file_path: String::new(),
            payload_keys: Vec::new(),
            trigger_keys: Vec::new(),
            initialized: false,
        }
    }

    /// Build an initialized slot from a persisted record, canonicalizing and
    /// deduping the key lists.
    pub fn from_record(id: impl Into<String>, record: &SlotRecord) -> Self {
        Self {
            id: id.into(),
            action: SlotAction::from_tag(&record.selected_option),
            resolution: record.selected_resolution.clone(),
            file_path: record.file_path.clone(),
            payload_keys: keys::dedup_canonical(&record.keys),
            trigger_keys: keys::dedup_canonical(&record.keys_bind),
            initialized: true,
        }
    }

    /// Project the slot back into its persisted record form.
    pub fn to_record(&self) -> SlotRecord {
        SlotRecord {
            selected_option: self.action.map(|a| a.tag().to_string()).unwrap_or_default(),
            selected_resolution: self.resolution.clone(),
            keys: self.payload_keys.clone(),
            keys_bind: self.trigger_keys.clone(),
            file_path: self.file_path.clone(),
        }
    }

    /// Change the slot's action, enforcing the derived field invariant:
    /// leaving `SetResolution` clears the resolution, leaving `OpenFile`
    /// clears the file path. Returns whether anything changed.
    pub fn set_action(&mut self, action: Option<SlotAction>) -> bool {
        if self.action == action {
            return false;
        }

        let previous = self.action;
        self.action = action;

        if previous == Some(SlotAction::SetResolution) && action != Some(SlotAction::SetResolution)
        {
            debug!(slot_id = %self.id, "Action left SetResolution, clearing resolution");
            self.resolution.clear();
        }
        if previous == Some(SlotAction::OpenFile) && action != Some(SlotAction::OpenFile) {
            debug!(slot_id = %self.id, "Action left OpenFile, clearing file path");
            self.file_path.clear();
        }

        true
    }
}
