//! Per-slot key-combo capture sessions.

use crate::keys;

use tracing::debug;

/// Which combo a recording session captures into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboKind {
    /// The combo registered as the slot's global hotkey.
    Trigger,
    /// The combo replayed when the slot's action runs.
    Payload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RecorderState {
    Idle,
    Recording { keys: Vec<String> },
}

/// Capture session state machine for one slot and one combo kind.
///
/// While recording, distinct canonical key names are accumulated in press
/// order. Key-up events are never fed to the recorder and recording never
/// auto-stops on key release. Trigger and payload recorders are independent
/// so concurrent capture across kinds is safe.
#[derive(Debug)]
pub struct ComboRecorder {
    kind: ComboKind,
    state: RecorderState,
}

impl ComboRecorder {
    /// Create an idle recorder for the given combo kind.
    pub fn new(kind: ComboKind) -> Self {
        Self {
            kind,
            state: RecorderState::Idle,
        }
    }

    /// The combo kind this recorder captures into.
    pub fn kind(&self) -> ComboKind {
        self.kind
    }

    /// Whether a capture session is active.
    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Begin a capture session, clearing any previously accumulated keys.
    ///
    /// Starting while already recording restarts the session from empty.
    pub fn start(&mut self) {
        self.state = RecorderState::Recording { keys: Vec::new() };
        debug!(kind = ?self.kind, "Recording started");
    }

    /// Feed a key-down event into the session.
    ///
    /// The raw label is canonicalized and appended only if not already
    /// present (set semantics, insertion order preserved). Ignored while
    /// idle.
    pub fn key_down(&mut self, raw: &str) {
        let RecorderState::Recording { keys } = &mut self.state else {
            return;
        };

        let canonical = keys::canonicalize(raw);
        if !keys.contains(&canonical) {
            debug!(kind = ?self.kind, key = %canonical, "Key captured");
            keys.push(canonical);
        }
    }

    /// End the session and return the committed combo.
    ///
    /// Returns an empty combo when no session was active.
    pub fn stop(&mut self) -> Vec<String> {
        match std::mem::replace(&mut self.state, RecorderState::Idle) {
            RecorderState::Recording { keys } => {
                debug!(kind = ?self.kind, combo = %keys.join("+"), "Recording stopped");
                keys
            }
            RecorderState::Idle => Vec::new(),
        }
    }

    /// The keys accumulated so far (empty while idle).
    pub fn keys(&self) -> &[String] {
        match &self.state {
            RecorderState::Recording { keys } => keys,
            RecorderState::Idle => &[],
        }
    }
}
