use futures::StreamExt;
use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{mpsc, Arc, Mutex},
    thread,
};
use tokio::time::{sleep, Duration, Instant};

use mount_transition::{
    RuntimeTokio, Transition, TransitionOptions, TransitionOptionsBuilder, TransitionSnapshot,
    TransitionStatus,
};

/// Lifecycle callbacks log with call times (in milliseconds since start).
#[derive(Clone)]
struct Recorder {
    start: Instant,
    calls: Arc<Mutex<Vec<(&'static str, u64)>>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            calls: Arc::new(Mutex::new(vec![])),
        }
    }

    fn hook(&self, name: &'static str) -> impl Fn() + Send + Sync + 'static {
        let recorder = self.clone();
        move || {
            let elapsed = recorder.start.elapsed().as_millis() as u64;
            recorder.calls.lock().unwrap().push((name, elapsed));
        }
    }

    fn options(&self) -> TransitionOptionsBuilder {
        TransitionOptions::builder()
            .on_enter(self.hook("enter"))
            .on_entered(self.hook("entered"))
            .on_exit(self.hook("exit"))
            .on_exited(self.hook("exited"))
            .on_removal_safe(self.hook("removal_safe"))
    }

    fn names(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(|(name, _)| *name).collect()
    }

    fn time_of(&self, name: &str) -> Option<u64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(call, _)| *call == name)
            .map(|(_, time)| *time)
    }
}

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

async fn advance(millis: u64) {
    sleep(Duration::from_millis(millis)).await;
}

#[tokio::test(start_paused = true)]
async fn keep_single_timer_for_any_toggle_sequence() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder.options().timeout(100).build().unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);

    for (shown, pause) in [
        (true, 30),
        (false, 10),
        (true, 0),
        (true, 150),
        (false, 60),
        (true, 5),
        (false, 200),
    ] {
        transition.observe(shown);
        assert!(matches!(
            transition.status(),
            TransitionStatus::Exited
                | TransitionStatus::Entering
                | TransitionStatus::Entered
                | TransitionStatus::Exiting
        ));
        advance(pause).await;
    }

    assert_eq!(transition.status(), TransitionStatus::Exited);
    assert!(!transition.has_pending_timer());
    assert_eq!(
        recorder.names(),
        vec!["enter", "exit", "enter", "entered", "exit", "enter", "exit", "exited"]
    );
}

#[tokio::test(start_paused = true)]
async fn snap_to_entered_without_initial_animation() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder.options().timeout(300).initial(false).build().unwrap();
    let transition = Transition::new(true, options, RuntimeTokio);

    assert_eq!(transition.status(), TransitionStatus::Entered);
    assert!(transition.is_visible());
    assert!(!transition.has_pending_timer());

    advance(1000).await;
    assert!(recorder.names().is_empty());
}

#[tokio::test(start_paused = true)]
async fn exit_hidden_element_on_first_mount_without_initial_animation() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder.options().timeout(100).initial(false).build().unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);

    assert_eq!(transition.status(), TransitionStatus::Exiting);
    assert!(transition.is_mounted());

    advance(99).await;
    assert_eq!(transition.status(), TransitionStatus::Exiting);
    advance(2).await;
    assert_eq!(transition.status(), TransitionStatus::Exited);

    assert_eq!(recorder.names(), vec!["exit", "exited"]);
    assert_eq!(recorder.time_of("exit"), Some(0));
    assert_eq!(recorder.time_of("exited"), Some(100));
}

#[tokio::test(start_paused = true)]
async fn enter_first_mount_once_element_is_present() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder.options().timeout(100).build().unwrap();
    let transition = Transition::new(true, options, RuntimeTokio);

    advance(50).await;
    assert_eq!(transition.status(), TransitionStatus::Exited);
    assert!(transition.is_mounted());
    assert!(recorder.names().is_empty());

    transition.confirm_presence();
    advance(101).await;

    assert_eq!(transition.status(), TransitionStatus::Entered);
    assert_eq!(recorder.names(), vec!["enter", "entered"]);
    assert_eq!(recorder.time_of("enter"), Some(50));
    assert_eq!(recorder.time_of("entered"), Some(150));
}

#[tokio::test(start_paused = true)]
async fn ignore_repeated_observation() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder.options().timeout(100).build().unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);

    transition.observe(true);
    advance(50).await;
    transition.observe(true);
    transition.observe(true);
    advance(100).await;
    transition.observe(true);
    advance(100).await;

    assert_eq!(recorder.names(), vec!["enter", "entered"]);
    assert_eq!(recorder.time_of("entered"), Some(100));
}

#[tokio::test(start_paused = true)]
async fn exit_mid_enter_without_entering() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder.options().timeout(500).build().unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);
    let stream = transition.stream();

    transition.observe(true);
    advance(100).await;
    transition.observe(false);
    assert_eq!(transition.status(), TransitionStatus::Exiting);

    advance(1000).await;
    drop(transition);

    let statuses: Vec<TransitionStatus> = stream.map(|snapshot| snapshot.status).collect().await;
    assert_eq!(
        statuses,
        vec![
            TransitionStatus::Entering,
            TransitionStatus::Exiting,
            TransitionStatus::Exited
        ]
    );
    assert_eq!(recorder.names(), vec!["enter", "exit", "exited"]);
}

#[tokio::test(start_paused = true)]
async fn respect_phase_timeout() {
    init_log();
    let options = TransitionOptions::builder().timeout(500).build().unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);

    transition.observe(true);
    advance(499).await;
    assert_eq!(transition.status(), TransitionStatus::Entering);

    advance(2).await;
    assert_eq!(transition.status(), TransitionStatus::Entered);
}

#[tokio::test(start_paused = true)]
async fn use_independent_phase_durations() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder.options().split_timeout(100, 400).build().unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);

    transition.observe(true);
    advance(99).await;
    assert_eq!(transition.status(), TransitionStatus::Entering);
    advance(2).await;
    assert_eq!(transition.status(), TransitionStatus::Entered);

    advance(99).await;
    transition.observe(false);
    advance(399).await;
    assert_eq!(transition.status(), TransitionStatus::Exiting);
    advance(2).await;
    assert_eq!(transition.status(), TransitionStatus::Exited);

    assert_eq!(recorder.time_of("entered"), Some(100));
    assert_eq!(recorder.time_of("exit"), Some(200));
    assert_eq!(recorder.time_of("exited"), Some(600));
}

#[tokio::test(start_paused = true)]
async fn toggle_unmounting_spinner() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder
        .options()
        .timeout(200)
        .unmount(true)
        .build()
        .unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);
    let stream = transition.stream();
    assert!(!transition.is_mounted());

    let snapshot = transition.observe(true);
    assert_eq!(snapshot.status, TransitionStatus::Exited);
    assert!(snapshot.mounted);

    transition.confirm_presence();
    advance(300).await;
    transition.observe(false);
    advance(199).await;
    assert!(transition.is_mounted());
    assert_eq!(recorder.time_of("removal_safe"), None);

    advance(2).await;
    assert!(!transition.is_mounted());
    assert_eq!(transition.observe(false).status, TransitionStatus::Exited);
    drop(transition);

    let snapshots: Vec<TransitionSnapshot> = stream.collect().await;
    let statuses: Vec<TransitionStatus> = snapshots.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        vec![
            TransitionStatus::Exited,
            TransitionStatus::Entering,
            TransitionStatus::Entered,
            TransitionStatus::Exiting,
            TransitionStatus::Exited,
            TransitionStatus::Exited,
        ]
    );
    assert!(!snapshots.last().unwrap().mounted);

    assert_eq!(
        recorder.names(),
        vec!["enter", "entered", "exit", "removal_safe", "exited"]
    );
    assert_eq!(recorder.time_of("enter"), Some(0));
    assert_eq!(recorder.time_of("entered"), Some(200));
    assert_eq!(recorder.time_of("exit"), Some(300));
    assert_eq!(recorder.time_of("exited"), Some(500));
    assert_eq!(recorder.time_of("removal_safe"), Some(500));
}

#[tokio::test(start_paused = true)]
async fn restart_enter_after_interrupted_exit() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder.options().timeout(200).build().unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);

    transition.observe(true);
    advance(50).await;
    transition.observe(false);
    advance(10).await;
    transition.observe(true);
    assert_eq!(transition.status(), TransitionStatus::Entering);

    advance(199).await;
    assert_eq!(transition.status(), TransitionStatus::Entering);
    advance(2).await;
    assert_eq!(transition.status(), TransitionStatus::Entered);

    advance(500).await;
    assert_eq!(recorder.names(), vec!["enter", "exit", "enter", "entered"]);
    assert_eq!(recorder.time_of("entered"), Some(260));
}

#[tokio::test(start_paused = true)]
async fn cancel_timers_when_dropped() {
    init_log();
    let recorder = Recorder::new();
    let options = recorder.options().timeout(100).build().unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);
    let stream = transition.stream();

    transition.observe(true);
    assert!(transition.has_pending_timer());
    drop(transition);

    advance(1000).await;
    assert_eq!(recorder.names(), vec!["enter"]);
    assert_eq!(stream.count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn commit_state_before_panicking_callback() {
    init_log();
    let options = TransitionOptions::builder()
        .timeout(100)
        .on_enter(|| panic!("consumer callback failed"))
        .build()
        .unwrap();
    let transition = Transition::new(false, options, RuntimeTokio);

    let result = catch_unwind(AssertUnwindSafe(|| transition.observe(true)));
    assert!(result.is_err());
    assert_eq!(transition.status(), TransitionStatus::Entering);
    assert!(transition.has_pending_timer());

    advance(101).await;
    assert_eq!(transition.status(), TransitionStatus::Entered);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn deliver_exit_completion_before_next_enter() {
    init_log();
    let recorder = Recorder::new();
    let (removal_tx, removal_rx) = mpsc::channel();
    let removal_tx = Mutex::new(removal_tx);
    let record_removal = recorder.hook("removal_safe");
    let options = recorder
        .options()
        .timeout(50)
        .unmount(true)
        .on_removal_safe(move || {
            let _ = removal_tx.lock().unwrap().send(());
            thread::sleep(Duration::from_millis(200));
            record_removal();
        })
        .build()
        .unwrap();
    let transition = Transition::new(true, options, RuntimeTokio);

    transition.confirm_presence();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(transition.status(), TransitionStatus::Entered);

    transition.observe(false);
    tokio::task::spawn_blocking(move || removal_rx.recv())
        .await
        .unwrap()
        .unwrap();

    let snapshot = transition.observe(true);
    assert_eq!(snapshot.status, TransitionStatus::Exited);
    assert!(snapshot.mounted);

    transition.confirm_presence();
    assert_eq!(transition.status(), TransitionStatus::Entering);
    assert_eq!(
        recorder.names(),
        vec!["enter", "entered", "exit", "removal_safe", "exited", "enter"]
    );
}
