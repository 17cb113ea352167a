use crate::keys::{accelerator, accelerator_token, canonicalize, dedup_canonical, format_combo};

/// WHAT: Canonicalization is idempotent
/// WHY: Canonical names must be safe to re-normalize when records round-trip
#[test]
fn given_any_label_when_canonicalized_twice_then_same_as_once() {
    let samples = [
        "Control", "ctrl", "Shift", "ALT", "Cmd", "command", "Esc", "Escape", "Enter", "Return",
        "Space", "Tab", "Backspace", "Delete", "Insert", "Home", "End", "PageUp", "PageDown",
        "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "F1", "F12", "a", "K", "7", "ç",
        "SomeUnknownKey",
    ];

    for raw in samples {
        let once = canonicalize(raw);
        assert_eq!(canonicalize(&once), once, "not idempotent for {raw:?}");
    }
}

/// WHAT: Raw aliases map into the canonical vocabulary
/// WHY: Storage and comparison must use one name per key
#[test]
fn given_aliases_when_canonicalized_then_single_vocabulary_name() {
    assert_eq!(canonicalize("Ctrl"), "control");
    assert_eq!(canonicalize("Control"), "control");
    assert_eq!(canonicalize("cmd"), "meta");
    assert_eq!(canonicalize("Command"), "meta");
    assert_eq!(canonicalize("Esc"), "escape");
    assert_eq!(canonicalize("Return"), "enter");
    assert_eq!(canonicalize("ArrowUp"), "up");
    assert_eq!(canonicalize("ArrowLeft"), "left");
}

/// WHAT: Unknown labels pass through lowercased
/// WHY: Plain character keys are their own canonical names, never an error
#[test]
fn given_unknown_label_when_canonicalized_then_lowercased_passthrough() {
    assert_eq!(canonicalize("K"), "k");
    assert_eq!(canonicalize("9"), "9");
    assert_eq!(canonicalize("MediaPlayPause"), "mediaplaypause");
}

/// WHAT: Display formatting dedupes while preserving first-seen order
/// WHY: Repeated raw events must not render as "ctrl+ctrl+a"
#[test]
fn given_duplicate_keys_when_formatted_then_deduped_in_order() {
    let keys = vec!["ctrl".to_string(), "ctrl".to_string(), "a".to_string()];
    assert_eq!(format_combo(&keys, "+"), "control+a");

    let mixed = vec![
        "Shift".to_string(),
        "Control".to_string(),
        "ctrl".to_string(),
        "b".to_string(),
    ];
    assert_eq!(format_combo(&mixed, "+"), "shift+control+b");
}

/// WHAT: Accelerator strings use the OS token vocabulary
/// WHY: The registration call expects "ctrl", not the canonical "control"
#[test]
fn given_trigger_combo_when_building_accelerator_then_os_tokens_joined() {
    let keys = vec!["ctrl".to_string(), "shift".to_string(), "k".to_string()];
    assert_eq!(accelerator(&keys), "ctrl+shift+k");

    let raw = vec!["Control".to_string(), "Escape".to_string()];
    assert_eq!(accelerator(&raw), "ctrl+esc");
}

/// WHAT: Accelerator tokens invert canonicalization for the modifier subset
/// WHY: The two tables must stay consistent for keys used as modifiers
#[test]
fn given_modifier_tokens_when_canonicalized_then_round_trip_holds() {
    for canonical in ["control", "escape", "meta", "shift", "alt"] {
        let token = accelerator_token(canonical);
        assert_eq!(canonicalize(&token), canonical);
    }
}

/// WHAT: Canonical dedup preserves insertion order
/// WHY: Combos are ordered sets; later duplicates must not reorder them
#[test]
fn given_aliased_duplicates_when_deduped_then_first_seen_order_kept() {
    let keys = vec![
        "Ctrl".to_string(),
        "k".to_string(),
        "control".to_string(),
        "Shift".to_string(),
    ];
    assert_eq!(dedup_canonical(&keys), vec!["control", "k", "shift"]);
}
