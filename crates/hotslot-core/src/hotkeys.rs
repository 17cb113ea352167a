//! Global hotkey lifecycle management.
//!
//! One [`SlotHotkey`] task per slot keeps the OS-level registration for that
//! slot's trigger combo in sync with `(global enable flag, trigger keys)` and
//! listens for trigger notifications scoped to the slot's identifier. All
//! backend calls are issued and awaited from this single task, so
//! registration changes are serialized per slot; a completion observed to be
//! stale against the latest desired state is discarded and superseded rather
//! than applied.

use crate::{ActionBackend, ActionDispatcher, Slot, error::Result as CoreResult, keys};

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// OS hotkey subsystem collaborator.
///
/// `register` supersedes any previous registration under the same
/// identifier. `unregister` is idempotent — releasing an identifier with no
/// live registration is not an error.
pub trait HotkeyBackend: Send + Sync {
    /// Bind an OS-wide hotkey under the given identifier.
    fn register(&self, identifier: &str, accelerator: &str) -> CoreResult<()>;
    /// Release the binding for the given identifier.
    fn unregister(&self, identifier: &str) -> CoreResult<()>;
}

/// Lifecycle task owning one slot's OS hotkey registration.
pub struct SlotHotkey<H: HotkeyBackend, A: ActionBackend> {
    identifier: String,
    backend: Arc<H>,
    dispatcher: ActionDispatcher<A>,
    slot_rx: watch::Receiver<Slot>,
    enabled_rx: watch::Receiver<bool>,
    triggers_tx: broadcast::Sender<String>,
    generation: u64,
}

impl<H, A> SlotHotkey<H, A>
where
    H: HotkeyBackend + 'static,
    A: ActionBackend + 'static,
{
    /// Create the lifecycle task state for one slot.
    ///
    /// The identifier is generated once per slot instance and is stable for
    /// the task's lifetime; it is not persisted and need not be
    /// deterministic across restarts.
    pub fn new(
        slot_id: &str,
        backend: Arc<H>,
        dispatcher: ActionDispatcher<A>,
        slot_rx: watch::Receiver<Slot>,
        enabled_rx: watch::Receiver<bool>,
        triggers_tx: broadcast::Sender<String>,
    ) -> Self {
        Self {
            identifier: format!("slot-{}-{}", slot_id, Uuid::new_v4()),
            backend,
            dispatcher,
            slot_rx,
            enabled_rx,
            triggers_tx,
            generation: 0,
        }
    }

    /// The slot's registration identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Run the lifecycle task until shutdown.
    ///
    /// On exit a final unregistration is always attempted regardless of the
    /// current flags, so a system-wide hotkey is never leaked.
    #[instrument(skip(self), fields(identifier = %self.identifier))]
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut applied: Option<String> = None;
        let mut triggers: Option<broadcast::Receiver<String>> = None;

        loop {
            self.sync_registration(&mut applied).await;
            self.sync_listener(&mut triggers);

            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey lifecycle shutting down");
                    break;
                }
                res = self.enabled_rx.changed() => {
                    if res.is_err() {
                        break;
                    }
                }
                res = self.slot_rx.changed() => {
                    if res.is_err() {
                        break;
                    }
                }
                Some(identifier) = recv_trigger(&mut triggers) => {
                    if identifier == self.identifier {
                        let slot = self.slot_rx.borrow().clone();
                        info!(slot_id = %slot.id, "Global hotkey triggered");
                        self.dispatcher.execute(&slot).await;
                    }
                }
            }
        }

        let backend = Arc::clone(&self.backend);
        let identifier = self.identifier.clone();
        match tokio::task::spawn_blocking(move || backend.unregister(&identifier)).await {
            Ok(Ok(())) => debug!("Final unregistration complete"),
            Ok(Err(e)) => warn!(error = %e, "Final unregistration failed"),
            Err(e) => warn!(error = ?e, "Final unregistration task panicked"),
        }
    }

    /// The registration this slot should have right now: its accelerator
    /// string iff hotkeys are enabled, the slot is initialized, and the
    /// trigger combo is non-empty.
    fn desired(&self) -> Option<String> {
        let enabled = *self.enabled_rx.borrow();
        let slot = self.slot_rx.borrow();
        if enabled && slot.initialized && !slot.trigger_keys.is_empty() {
            Some(keys::accelerator(&slot.trigger_keys))
        } else {
            None
        }
    }

    /// Drive the backend toward the desired registration state.
    ///
    /// Each change is tagged with a monotonic generation; after a backend
    /// call completes, the desired state is re-read and a now-stale
    /// completion is superseded by another round instead of being trusted.
    async fn sync_registration(&mut self, applied: &mut Option<String>) {
        loop {
            let desired = self.desired();
            if desired == *applied {
                return;
            }

            self.generation += 1;
            let generation = self.generation;
            let backend = Arc::clone(&self.backend);
            let identifier = self.identifier.clone();
            let target = desired.clone();

            let result =
                tokio::task::spawn_blocking(move || match &target {
                    Some(accelerator) => backend.register(&identifier, accelerator),
                    None => backend.unregister(&identifier),
                })
                .await;

            match result {
                Ok(Ok(())) => match &desired {
                    Some(accelerator) => {
                        info!(generation, accelerator = %accelerator, "Global hotkey registered")
                    }
                    None => debug!(generation, "Global hotkey unregistered"),
                },
                Ok(Err(e)) => {
                    // Slot behaves as if unregistered until the combo or the
                    // enable flag changes again.
                    warn!(generation, error = %e, "Registration change failed, binding inert");
                }
                Err(e) => {
                    warn!(generation, error = ?e, "Registration task panicked, binding inert");
                }
            }

            // Bookkeeping records the state we acted on, success or not, so
            // a denied registration is not retried until the inputs change.
            *applied = desired;
        }
    }

    /// Hold a trigger subscription exactly while enabled and initialized,
    /// re-establishing it whenever either input changes back.
    fn sync_listener(&self, triggers: &mut Option<broadcast::Receiver<String>>) {
        let should_listen = *self.enabled_rx.borrow() && self.slot_rx.borrow().initialized;
        match (should_listen, triggers.is_some()) {
            (true, false) => {
                debug!("Subscribing to trigger notifications");
                *triggers = Some(self.triggers_tx.subscribe());
            }
            (false, true) => {
                debug!("Dropping trigger subscription");
                *triggers = None;
            }
            _ => {}
        }
    }
}

/// Receive the next trigger identifier, or pend forever while not
/// subscribed so the select arm stays quiet.
async fn recv_trigger(triggers: &mut Option<broadcast::Receiver<String>>) -> Option<String> {
    match triggers {
        Some(rx) => loop {
            match rx.recv().await {
                Ok(identifier) => return Some(identifier),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Trigger notifications lagged, continuing");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        },
        None => std::future::pending().await,
    }
}
