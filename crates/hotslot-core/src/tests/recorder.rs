use crate::{ComboKind, ComboRecorder};

/// WHAT: Recording never stores duplicate keys
/// WHY: A combo is an ordered set; repeated presses must collapse
#[test]
fn given_repeated_key_when_recording_then_stored_once() {
    let mut recorder = ComboRecorder::new(ComboKind::Payload);
    recorder.start();

    recorder.key_down("a");
    recorder.key_down("a");

    assert_eq!(recorder.stop(), vec!["a"]);
}

/// WHAT: Raw labels are canonicalized as they are captured
/// WHY: Aliased labels ("Ctrl"/"Control") must dedupe to one canonical name
#[test]
fn given_aliased_labels_when_recording_then_canonical_and_deduped() {
    let mut recorder = ComboRecorder::new(ComboKind::Trigger);
    recorder.start();

    recorder.key_down("Ctrl");
    recorder.key_down("Control");
    recorder.key_down("Shift");
    recorder.key_down("K");

    assert_eq!(recorder.stop(), vec!["control", "shift", "k"]);
}

/// WHAT: Key events while idle are ignored
/// WHY: Only an armed session may accumulate keys
#[test]
fn given_idle_recorder_when_key_pressed_then_nothing_captured() {
    let mut recorder = ComboRecorder::new(ComboKind::Payload);

    recorder.key_down("a");

    assert!(!recorder.is_recording());
    assert!(recorder.stop().is_empty());
}

/// WHAT: Starting a session clears previously accumulated keys
/// WHY: start() must always begin from an empty sequence
#[test]
fn given_active_session_when_restarted_then_sequence_cleared() {
    let mut recorder = ComboRecorder::new(ComboKind::Payload);
    recorder.start();
    recorder.key_down("a");

    recorder.start();
    recorder.key_down("b");

    assert_eq!(recorder.stop(), vec!["b"]);
}

/// WHAT: Stop commits the sequence and returns the recorder to idle
/// WHY: The committed combo is handed to store sync exactly once
#[test]
fn given_recording_when_stopped_then_idle_and_combo_returned() {
    let mut recorder = ComboRecorder::new(ComboKind::Trigger);
    recorder.start();
    recorder.key_down("f5");

    let combo = recorder.stop();

    assert_eq!(combo, vec!["f5"]);
    assert!(!recorder.is_recording());
    assert!(recorder.keys().is_empty());
}

/// WHAT: Trigger and payload sessions are independent
/// WHY: Concurrent recording across kinds must not share state
#[test]
fn given_both_kinds_recording_when_keys_arrive_then_sessions_do_not_interfere() {
    let mut trigger = ComboRecorder::new(ComboKind::Trigger);
    let mut payload = ComboRecorder::new(ComboKind::Payload);

    trigger.start();
    payload.start();
    trigger.key_down("ctrl");
    payload.key_down("a");

    assert_eq!(trigger.stop(), vec!["control"]);
    assert_eq!(payload.stop(), vec!["a"]);
}
