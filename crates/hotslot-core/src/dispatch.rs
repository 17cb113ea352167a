//! Action dispatch with an in-flight guard and cool-down.

use crate::{Resolution, Slot, SlotAction, error::Result as CoreResult};

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Default delay before replaying the payload combo, letting modifier
/// key-ups from the triggering press settle on the native side.
pub const DEFAULT_PAYLOAD_DELAY: Duration = Duration::from_millis(100);

/// Default cool-down held after an execution completes, so a rapid
/// double-trigger (manual click plus global-hotkey event) collapses into a
/// single execution.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(500);

/// Native command collaborator for slot actions.
pub trait ActionBackend: Send + Sync {
    /// Open a file with the OS default handler.
    fn open_file(&self, path: &str) -> CoreResult<()>;
    /// Change the display resolution.
    fn set_resolution(&self, width: u32, height: u32) -> CoreResult<()>;
    /// Synthesize a key-chord press for the given canonical key names.
    fn inject_keys(&self, keys: &[String]) -> CoreResult<()>;
    /// Enumerate display modes supported by the primary display.
    fn available_resolutions(&self) -> CoreResult<Vec<(u32, u32)>>;
}

/// Execution state of one slot's dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    /// No execution in flight; triggers are accepted.
    Idle,
    /// An execution is running; further triggers are ignored.
    Running,
    /// Execution finished; triggers stay ignored until the cool-down ends.
    CoolingDown,
}

/// Dispatch timing knobs, injectable for tests.
#[derive(Debug, Clone, Copy)]
pub struct DispatchTimings {
    /// Delay before the payload combo is injected.
    pub payload_delay: Duration,
    /// Cool-down held after completion before accepting the next trigger.
    pub cooldown: Duration,
}

impl Default for DispatchTimings {
    fn default() -> Self {
        Self {
            payload_delay: DEFAULT_PAYLOAD_DELAY,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

/// Per-slot executor for the configured action and payload combo.
///
/// The in-flight guard is scoped to this dispatcher (and therefore to its
/// slot), not global. Failures in individual steps are logged and never
/// abort the remaining steps.
pub struct ActionDispatcher<A> {
    slot_id: String,
    backend: Arc<A>,
    timings: DispatchTimings,
    state: Arc<Mutex<ExecState>>,
}

impl<A: ActionBackend + 'static> ActionDispatcher<A> {
    /// Create a dispatcher for one slot.
    pub fn new(slot_id: impl Into<String>, backend: Arc<A>, timings: DispatchTimings) -> Self {
        Self {
            slot_id: slot_id.into(),
            backend,
            timings,
            state: Arc::new(Mutex::new(ExecState::Idle)),
        }
    }

    /// Current execution state.
    pub async fn state(&self) -> ExecState {
        *self.state.lock().await
    }

    /// Execute the slot's configured action and payload combo.
    ///
    /// A no-op while an execution is already running or cooling down, so
    /// overlapping trigger sources collapse into one execution.
    #[instrument(skip(self, slot), fields(slot_id = %self.slot_id))]
    pub async fn execute(&self, slot: &Slot) {
        {
            let mut state = self.state.lock().await;
            if *state != ExecState::Idle {
                debug!(state = ?*state, "Execution already in flight, ignoring trigger");
                return;
            }
            *state = ExecState::Running;
        }

        match slot.action {
            Some(SlotAction::SetResolution) => self.run_set_resolution(slot).await,
            Some(SlotAction::OpenFile) => self.run_open_file(slot).await,
            Some(SlotAction::ReplayKeys) | None => {}
        }

        if !slot.payload_keys.is_empty() {
            self.run_inject_keys(slot).await;
        }

        info!("Execution complete, entering cool-down");

        *self.state.lock().await = ExecState::CoolingDown;

        let state = Arc::clone(&self.state);
        let cooldown = self.timings.cooldown;
        tokio::spawn(async move {
            tokio::time::sleep(cooldown).await;
            *state.lock().await = ExecState::Idle;
        });
    }

    async fn run_set_resolution(&self, slot: &Slot) {
        if slot.resolution.is_empty() {
            debug!("No resolution configured, skipping");
            return;
        }

        let Some(resolution) = Resolution::parse(&slot.resolution) else {
            warn!(resolution = %slot.resolution, "Unparseable resolution, skipping");
            return;
        };

        let backend = Arc::clone(&self.backend);
        match tokio::task::spawn_blocking(move || {
            backend.set_resolution(resolution.width, resolution.height)
        })
        .await
        {
            Ok(Ok(())) => info!(
                width = resolution.width,
                height = resolution.height,
                "Resolution changed"
            ),
            Ok(Err(e)) => warn!(error = %e, "Resolution change failed"),
            Err(e) => warn!(error = ?e, "Resolution task panicked"),
        }
    }

    async fn run_open_file(&self, slot: &Slot) {
        if slot.file_path.is_empty() {
            debug!("No file path configured, skipping");
            return;
        }

        let backend = Arc::clone(&self.backend);
        let path = slot.file_path.clone();
        match tokio::task::spawn_blocking(move || backend.open_file(&path)).await {
            Ok(Ok(())) => info!(path = %slot.file_path, "File opened"),
            Ok(Err(e)) => warn!(error = %e, "Open file failed"),
            Err(e) => warn!(error = ?e, "Open file task panicked"),
        }
    }

    async fn run_inject_keys(&self, slot: &Slot) {
        tokio::time::sleep(self.timings.payload_delay).await;

        let backend = Arc::clone(&self.backend);
        let keys = slot.payload_keys.clone();
        match tokio::task::spawn_blocking(move || backend.inject_keys(&keys)).await {
            Ok(Ok(())) => info!(combo = %slot.payload_keys.join("+"), "Payload combo injected"),
            Ok(Err(e)) => warn!(error = %e, "Key injection failed"),
            Err(e) => warn!(error = ?e, "Key injection task panicked"),
        }
    }
}
