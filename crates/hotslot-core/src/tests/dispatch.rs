use crate::{
    ActionBackend, ActionDispatcher, CoreError, CoreResult, DispatchTimings, ExecState, Slot,
    SlotRecord,
};

use std::{
    panic::Location,
    sync::{Arc, Mutex, atomic::{AtomicBool, Ordering}},
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::time::sleep;

/// Records every native command invocation.
struct MockActions {
    opens: Mutex<Vec<String>>,
    resolutions: Mutex<Vec<(u32, u32)>>,
    injects: Mutex<Vec<Vec<String>>>,
    fail_resolution: AtomicBool,
}

impl MockActions {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            opens: Mutex::new(Vec::new()),
            resolutions: Mutex::new(Vec::new()),
            injects: Mutex::new(Vec::new()),
            fail_resolution: AtomicBool::new(false),
        })
    }
}

impl ActionBackend for MockActions {
    #[allow(clippy::unwrap_used)]
    fn open_file(&self, path: &str) -> CoreResult<()> {
        self.opens.lock().unwrap().push(path.to_string());
        Ok(())
    }

    #[allow(clippy::unwrap_used)]
    fn set_resolution(&self, width: u32, height: u32) -> CoreResult<()> {
        if self.fail_resolution.load(Ordering::SeqCst) {
            return Err(CoreError::ActionFailed {
                reason: "mock resolution failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.resolutions.lock().unwrap().push((width, height));
        Ok(())
    }

    #[allow(clippy::unwrap_used)]
    fn inject_keys(&self, keys: &[String]) -> CoreResult<()> {
        self.injects.lock().unwrap().push(keys.to_vec());
        Ok(())
    }

    fn available_resolutions(&self) -> CoreResult<Vec<(u32, u32)>> {
        Ok(vec![(1920, 1080), (1280, 720)])
    }
}

fn fast_timings() -> DispatchTimings {
    DispatchTimings {
        payload_delay: Duration::from_millis(5),
        cooldown: Duration::from_millis(30),
    }
}

fn slot_from(record: SlotRecord) -> Slot {
    Slot::from_record("1", &record)
}

/// WHAT: Overlapping triggers collapse into a single execution
/// WHY: A manual click and a global-hotkey event may arrive together
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_two_overlapping_triggers_when_executed_then_single_run() {
    // Given: A replay-keys slot and its dispatcher
    let actions = MockActions::new();
    let dispatcher = ActionDispatcher::new("1", Arc::clone(&actions), fast_timings());
    let slot = slot_from(SlotRecord {
        selected_option: "key".to_string(),
        keys: vec!["ctrl".to_string(), "v".to_string()],
        ..SlotRecord::default()
    });

    // When: Two triggers overlap
    tokio::join!(dispatcher.execute(&slot), dispatcher.execute(&slot));

    // Then: The payload was injected exactly once
    assert_eq!(actions.injects.lock().unwrap().len(), 1);
}

/// WHAT: A persisted "1920x1080" dispatches width 1920, height 1080
/// WHY: The WxH record format must parse into integer command arguments
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_resolution_record_when_executed_then_parsed_dimensions_sent() {
    // Given: A resolution slot
    let actions = MockActions::new();
    let dispatcher = ActionDispatcher::new("1", Arc::clone(&actions), fast_timings());
    let slot = slot_from(SlotRecord {
        selected_option: "resolutions".to_string(),
        selected_resolution: "1920x1080".to_string(),
        ..SlotRecord::default()
    });

    // When: The slot executes
    dispatcher.execute(&slot).await;

    // Then: The external command received the parsed pair
    assert_eq!(*actions.resolutions.lock().unwrap(), vec![(1920, 1080)]);
}

/// WHAT: An unparseable resolution skips the command without aborting
/// WHY: Malformed persisted data degrades to an inert step, not a crash
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_malformed_resolution_when_executed_then_step_skipped() {
    // Given: A resolution slot with a junk value and a payload combo
    let actions = MockActions::new();
    let dispatcher = ActionDispatcher::new("1", Arc::clone(&actions), fast_timings());
    let slot = slot_from(SlotRecord {
        selected_option: "resolutions".to_string(),
        selected_resolution: "widexhigh".to_string(),
        keys: vec!["a".to_string()],
        ..SlotRecord::default()
    });

    // When: The slot executes
    dispatcher.execute(&slot).await;

    // Then: No resolution call, but the payload step still ran
    assert!(actions.resolutions.lock().unwrap().is_empty());
    assert_eq!(actions.injects.lock().unwrap().len(), 1);
}

/// WHAT: An empty file path performs no open call
/// WHY: The presence check guards the external command
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_empty_file_path_when_executed_then_no_open_call() {
    // Given: An open-file slot with an empty path
    let actions = MockActions::new();
    let dispatcher = ActionDispatcher::new("1", Arc::clone(&actions), fast_timings());
    let slot = slot_from(SlotRecord {
        selected_option: "open file".to_string(),
        ..SlotRecord::default()
    });

    // When: The slot executes
    dispatcher.execute(&slot).await;

    // Then: No open call happened
    assert!(actions.opens.lock().unwrap().is_empty());
}

/// WHAT: A failing step does not prevent later steps
/// WHY: Each step's failure is caught and logged independently
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_resolution_when_executed_then_payload_still_injected() {
    // Given: A resolution slot whose backend rejects the change
    let actions = MockActions::new();
    actions.fail_resolution.store(true, Ordering::SeqCst);
    let dispatcher = ActionDispatcher::new("1", Arc::clone(&actions), fast_timings());
    let slot = slot_from(SlotRecord {
        selected_option: "resolutions".to_string(),
        selected_resolution: "1280x720".to_string(),
        keys: vec!["enter".to_string()],
        ..SlotRecord::default()
    });

    // When: The slot executes
    dispatcher.execute(&slot).await;

    // Then: The payload combo was injected despite the failed step
    assert_eq!(
        *actions.injects.lock().unwrap(),
        vec![vec!["enter".to_string()]]
    );
}

/// WHAT: The dispatcher cools down after completion, then accepts again
/// WHY: The guard is an explicit Idle/Running/CoolingDown state machine
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_completed_execution_when_cooldown_elapses_then_idle_again() {
    // Given: A replay-keys slot
    let actions = MockActions::new();
    let timings = fast_timings();
    let dispatcher = ActionDispatcher::new("1", Arc::clone(&actions), timings);
    let slot = slot_from(SlotRecord {
        selected_option: "key".to_string(),
        keys: vec!["a".to_string()],
        ..SlotRecord::default()
    });

    // When: The slot executes once
    dispatcher.execute(&slot).await;

    // Then: The dispatcher is cooling down and rejects a second trigger
    assert_eq!(dispatcher.state().await, ExecState::CoolingDown);
    dispatcher.execute(&slot).await;
    assert_eq!(actions.injects.lock().unwrap().len(), 1);

    // And: After the cool-down it accepts again
    sleep(timings.cooldown * 3).await;
    assert_eq!(dispatcher.state().await, ExecState::Idle);
    dispatcher.execute(&slot).await;
    assert_eq!(actions.injects.lock().unwrap().len(), 2);
}
