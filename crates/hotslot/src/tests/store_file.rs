use crate::TomlSlotStore;

use std::fs;

use hotslot_core::{SlotRecord, SlotStore};
use uuid::Uuid;

fn temp_store() -> (TomlSlotStore, std::path::PathBuf) {
    let dir = std::env::temp_dir().join(format!("hotslot-test-{}", Uuid::new_v4()));
    (TomlSlotStore::with_dir(&dir), dir)
}

fn sample_record() -> SlotRecord {
    SlotRecord {
        selected_option: "key".to_string(),
        selected_resolution: "1920x1080".to_string(),
        keys: vec!["control".to_string(), "v".to_string()],
        keys_bind: vec!["control".to_string(), "f5".to_string()],
        file_path: String::new(),
    }
}

/// WHAT: A saved record loads back identical
/// WHY: Slot state must survive process restarts intact
#[test]
#[allow(clippy::unwrap_used)]
fn given_saved_record_when_loaded_then_identical() {
    // Given: A store and a populated record
    let (store, dir) = temp_store();
    let record = sample_record();

    // When: Saving then loading
    store.save("1", &record).unwrap();
    let loaded = store.load("1").unwrap();

    // Then: The round trip preserves every field
    assert_eq!(loaded, Some(record));

    let _ = fs::remove_dir_all(dir);
}

/// WHAT: Loading a slot with no file yields None, not an error
/// WHY: First launch has no records and must not be treated as a failure
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_store_when_loaded_then_none() {
    // Given: A store whose directory does not exist yet
    let (store, dir) = temp_store();

    // When: Loading an unknown slot
    let loaded = store.load("1").unwrap();

    // Then: There is simply no record
    assert_eq!(loaded, None);

    let _ = fs::remove_dir_all(dir);
}

/// WHAT: A corrupt record file surfaces a load error
/// WHY: The worker falls back to defaults on load failure; it needs to see
/// the failure rather than a silently empty record
#[test]
#[allow(clippy::unwrap_used)]
fn given_corrupt_file_when_loaded_then_errors() {
    // Given: A slot file containing invalid TOML
    let (store, dir) = temp_store();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("shortcuts-1.toml"), "not = [valid").unwrap();

    // When: Loading it
    let result = store.load("1");

    // Then: The parse failure propagates
    assert!(result.is_err());

    let _ = fs::remove_dir_all(dir);
}

/// WHAT: Saving leaves no temp file behind
/// WHY: The atomic write must complete with a rename, not a stray .tmp
#[test]
#[allow(clippy::unwrap_used)]
fn given_completed_save_when_listing_dir_then_no_temp_file() {
    // Given: A store with one saved record
    let (store, dir) = temp_store();
    store.save("1", &sample_record()).unwrap();

    // When: Listing the store directory
    let leftovers: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();

    // Then: Only the final record file remains
    assert!(leftovers.is_empty());

    let _ = fs::remove_dir_all(dir);
}

/// WHAT: Records for different slots live in separate files
/// WHY: One slot's save must never clobber another slot's state
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_slots_when_saved_then_loaded_independently() {
    // Given: Two different records under two slot ids
    let (store, dir) = temp_store();
    let first = sample_record();
    let mut second = sample_record();
    second.selected_option = "open file".to_string();
    second.file_path = "C:/notes.txt".to_string();

    // When: Saving both
    store.save("1", &first).unwrap();
    store.save("2", &second).unwrap();

    // Then: Each loads its own record
    assert_eq!(store.load("1").unwrap(), Some(first));
    assert_eq!(store.load("2").unwrap(), Some(second));

    let _ = fs::remove_dir_all(dir);
}
