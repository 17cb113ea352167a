//! Binding store synchronization.
//!
//! One [`SlotWorker`] task per slot owns the in-memory [`Slot`] and keeps it
//! reconciled with the persisted record in both directions: explicit local
//! mutations write back immediately, and a cooperative polling interval
//! re-reads the record to pick up changes made by another view of the same
//! slot. The reload path never writes back what it just read, so the two
//! directions cannot ping-pong.

use crate::{
    ComboKind, ComboRecorder, Slot, SlotAction,
    error::Result as CoreResult,
    slot::SlotRecord,
};

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{mpsc, watch},
    time::MissedTickBehavior,
};
use tracing::{debug, info, instrument, warn};

/// Persistence collaborator for slot records.
///
/// Implementations are best-effort: a failed load falls back to defaults, a
/// failed save is logged and local state stands.
pub trait SlotStore: Send + Sync {
    /// Read the record for a slot. `Ok(None)` means no record exists yet.
    fn load(&self, slot_id: &str) -> CoreResult<Option<SlotRecord>>;
    /// Write the record for a slot, replacing any previous one.
    fn save(&self, slot_id: &str, record: &SlotRecord) -> CoreResult<()>;
}

/// Mutations accepted by a slot worker.
///
/// Every variant except the recording start is an explicit local mutation
/// and therefore allowed to write back to the store.
#[derive(Debug, Clone)]
pub enum SlotCommand {
    /// Change the slot's action.
    SetAction(Option<SlotAction>),
    /// Change the resolution string (`"WxH"`).
    SetResolution(String),
    /// Change the open-file path.
    SetFilePath(String),
    /// Arm the capture session for one combo kind.
    StartRecording(ComboKind),
    /// Feed a raw key-down event to all armed capture sessions.
    RecordKey(String),
    /// Disarm the capture session and commit its combo to the slot.
    StopRecording(ComboKind),
}

/// Cloneable handle to a running slot worker.
#[derive(Debug, Clone)]
pub struct SlotHandle {
    /// Command sender for local mutations.
    pub commands: mpsc::Sender<SlotCommand>,
    /// Eventually-consistent view of the slot state.
    pub state: watch::Receiver<Slot>,
}

/// Store-sync worker owning one slot's state and capture sessions.
pub struct SlotWorker<S: SlotStore> {
    slot: Slot,
    store: Arc<S>,
    poll_interval: Duration,
    command_rx: mpsc::Receiver<SlotCommand>,
    state_tx: watch::Sender<Slot>,
    shutdown_rx: watch::Receiver<bool>,
    trigger_recorder: ComboRecorder,
    payload_recorder: ComboRecorder,
}

impl<S: SlotStore> SlotWorker<S> {
    /// Create a worker and its handle. The worker does nothing until
    /// [`run`](Self::run) is spawned.
    pub fn new(
        slot_id: impl Into<String>,
        store: Arc<S>,
        poll_interval: Duration,
        shutdown_rx: watch::Receiver<bool>,
    ) -> (Self, SlotHandle) {
        let slot = Slot::new(slot_id);
        let (command_tx, command_rx) = mpsc::channel(32);
        let (state_tx, state_rx) = watch::channel(slot.clone());

        let worker = Self {
            slot,
            store,
            poll_interval,
            command_rx,
            state_tx,
            shutdown_rx,
            trigger_recorder: ComboRecorder::new(ComboKind::Trigger),
            payload_recorder: ComboRecorder::new(ComboKind::Payload),
        };
        let handle = SlotHandle {
            commands: command_tx,
            state: state_rx,
        };

        (worker, handle)
    }

    /// Run the worker until shutdown is signalled or all command senders are
    /// dropped. The polling timer lives inside this task, so teardown is
    /// deterministic.
    #[instrument(skip(self), fields(slot_id = %self.slot.id))]
    pub async fn run(mut self) {
        self.load_initial();

        let mut poll = tokio::time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; consume it so the loop's
        // first reload happens one full interval after activation.
        poll.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown_rx.changed() => {
                    info!("Slot worker shutting down");
                    break;
                }
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd),
                        None => {
                            info!("Command channel closed, slot worker stopping");
                            break;
                        }
                    }
                }
                _ = poll.tick() => self.reload(),
            }
        }
    }

    /// Load the persisted record on activation.
    ///
    /// A failed load treats the slot as present-but-empty and still marks it
    /// initialized, so dependents are never stuck waiting.
    fn load_initial(&mut self) {
        match self.store.load(&self.slot.id) {
            Ok(record) => {
                self.slot = Slot::from_record(self.slot.id.clone(), &record.unwrap_or_default());
                info!("Slot record loaded");
            }
            Err(e) => {
                warn!(error = %e, "Initial load failed, using defaults");
                let mut slot = Slot::new(self.slot.id.clone());
                slot.initialized = true;
                self.slot = slot;
            }
        }
        self.publish();
    }

    fn handle_command(&mut self, cmd: SlotCommand) {
        let changed = match cmd {
            SlotCommand::SetAction(action) => self.slot.set_action(action),
            SlotCommand::SetResolution(resolution) => {
                let changed = self.slot.resolution != resolution;
                self.slot.resolution = resolution;
                changed
            }
            SlotCommand::SetFilePath(path) => {
                let changed = self.slot.file_path != path;
                self.slot.file_path = path;
                changed
            }
            SlotCommand::StartRecording(kind) => {
                self.recorder_mut(kind).start();
                false
            }
            SlotCommand::RecordKey(raw) => {
                // A raw key stream reaches every armed session; trigger and
                // payload sessions are independent.
                self.trigger_recorder.key_down(&raw);
                self.payload_recorder.key_down(&raw);
                false
            }
            SlotCommand::StopRecording(kind) => {
                let combo = self.recorder_mut(kind).stop();
                match kind {
                    ComboKind::Trigger => {
                        let changed = self.slot.trigger_keys != combo;
                        self.slot.trigger_keys = combo;
                        changed
                    }
                    ComboKind::Payload => {
                        let changed = self.slot.payload_keys != combo;
                        self.slot.payload_keys = combo;
                        changed
                    }
                }
            }
        };

        if changed {
            self.publish();
            self.write_back();
        }
    }

    fn recorder_mut(&mut self, kind: ComboKind) -> &mut ComboRecorder {
        match kind {
            ComboKind::Trigger => &mut self.trigger_recorder,
            ComboKind::Payload => &mut self.payload_recorder,
        }
    }

    /// Write the current slot back to the store.
    ///
    /// Fires only from explicit local mutations, never from the reload path.
    /// Local state is the source of truth for this session; persistence is
    /// best-effort, so a failed save is logged and nothing rolls back.
    fn write_back(&self) {
        if let Err(e) = self.store.save(&self.slot.id, &self.slot.to_record()) {
            warn!(error = %e, "Write-back failed, keeping local state");
        } else {
            debug!("Slot record written back");
        }
    }

    /// Re-read the persisted record and apply it only if it differs from the
    /// current state, avoiding redundant publishes and redundant hotkey
    /// re-registration downstream.
    fn reload(&mut self) {
        let record = match self.store.load(&self.slot.id) {
            Ok(record) => record.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Periodic reload failed, keeping local state");
                return;
            }
        };

        let incoming = Slot::from_record(self.slot.id.clone(), &record);
        if incoming != self.slot {
            debug!("External record change detected, applying");
            self.slot = incoming;
            self.publish();
        }
    }

    fn publish(&self) {
        // Receivers may all be gone during shutdown; nothing to do then.
        let _ = self.state_tx.send(self.slot.clone());
    }
}
