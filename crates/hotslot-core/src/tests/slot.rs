use crate::{Resolution, Slot, SlotAction, SlotRecord};

/// WHAT: Leaving SetResolution clears the resolution field
/// WHY: The resolution is meaningful only while the action is SetResolution
#[test]
fn given_resolution_action_when_switched_away_then_resolution_cleared() {
    let record = SlotRecord {
        selected_option: "resolutions".to_string(),
        selected_resolution: "1920x1080".to_string(),
        ..SlotRecord::default()
    };
    let mut slot = Slot::from_record("1", &record);

    let changed = slot.set_action(Some(SlotAction::ReplayKeys));

    assert!(changed);
    assert!(slot.resolution.is_empty());
    assert!(slot.to_record().selected_resolution.is_empty());
}

/// WHAT: Leaving OpenFile clears the file path
/// WHY: The path is meaningful only while the action is OpenFile
#[test]
fn given_open_file_action_when_switched_away_then_path_cleared() {
    let record = SlotRecord {
        selected_option: "open file".to_string(),
        file_path: "C:/notes.txt".to_string(),
        ..SlotRecord::default()
    };
    let mut slot = Slot::from_record("2", &record);

    assert!(slot.set_action(Some(SlotAction::SetResolution)));
    assert!(slot.file_path.is_empty());
    assert!(slot.to_record().file_path.is_empty());
}

/// WHAT: Setting the same action again reports no change
/// WHY: Redundant writes and re-registrations must be avoided
#[test]
fn given_unchanged_action_when_set_then_no_change_reported() {
    let mut slot = Slot::new("3");
    assert!(slot.set_action(Some(SlotAction::OpenFile)));
    assert!(!slot.set_action(Some(SlotAction::OpenFile)));
}

/// WHAT: Record round-trip canonicalizes and dedupes key lists
/// WHY: Persisted records may hold raw labels from another view of the slot
#[test]
fn given_raw_record_when_loaded_then_keys_canonical_and_deduped() {
    let record = SlotRecord {
        selected_option: "key".to_string(),
        keys: vec!["Ctrl".to_string(), "control".to_string(), "V".to_string()],
        keys_bind: vec!["Ctrl".to_string(), "Shift".to_string(), "K".to_string()],
        ..SlotRecord::default()
    };

    let slot = Slot::from_record("4", &record);

    assert_eq!(slot.action, Some(SlotAction::ReplayKeys));
    assert_eq!(slot.payload_keys, vec!["control", "v"]);
    assert_eq!(slot.trigger_keys, vec!["control", "shift", "k"]);
    assert!(slot.initialized);

    let back = slot.to_record();
    assert_eq!(back.selected_option, "key");
    assert_eq!(back.keys_bind, vec!["control", "shift", "k"]);
}

/// WHAT: Unknown or empty action tags map to no action
/// WHY: A corrupted or blank record must degrade to an inert slot
#[test]
fn given_unknown_tag_when_parsed_then_no_action() {
    assert_eq!(SlotAction::from_tag(""), None);
    assert_eq!(SlotAction::from_tag("macro"), None);
    assert_eq!(SlotAction::from_tag("open file"), Some(SlotAction::OpenFile));
    assert_eq!(
        SlotAction::from_tag("resolutions"),
        Some(SlotAction::SetResolution)
    );
}

/// WHAT: Resolution strings parse as WxH
/// WHY: Dispatch needs integers; malformed strings must be rejected, not panic
#[test]
fn given_resolution_strings_when_parsed_then_valid_pairs_only() {
    assert_eq!(
        Resolution::parse("1920x1080"),
        Some(Resolution {
            width: 1920,
            height: 1080
        })
    );
    assert_eq!(Resolution::parse(""), None);
    assert_eq!(Resolution::parse("1920"), None);
    assert_eq!(Resolution::parse("widexhigh"), None);
    assert_eq!(Resolution::parse("1920x"), None);
}
