//! Batch runner tests with scripted executors (no git required)

use async_trait::async_trait;
use classroom_repos::batch::{
    cancellation_channel, BatchEvent, BatchKind, BatchOutcome, BatchRunner, PullProtocol,
    RecordingReporter, Step, StepExecutor, StepOutcome,
};
use classroom_repos::core::RepositoryTarget;
use classroom_repos::git::OperationResult;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

type Respond = dyn Fn(&Path, &Step) -> StepOutcome + Send + Sync;

/// Answers steps from a closure and logs `<dir>: <step>` for each
struct ScriptedExecutor {
    log: Mutex<Vec<String>>,
    respond: Box<Respond>,
}

impl ScriptedExecutor {
    fn new(respond: impl Fn(&Path, &Step) -> StepOutcome + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            log: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl StepExecutor for ScriptedExecutor {
    async fn execute(&self, step: Step) -> StepOutcome {
        let dir = match &step {
            Step::Git(command) => command.dir.clone(),
            Step::CopyFile { to, .. } => to.clone(),
            Step::CreateFile { path, .. } => path.clone(),
        };
        self.log
            .lock()
            .unwrap()
            .push(format!("{}: {}", dir.display(), step));
        (self.respond)(&dir, &step)
    }
}

fn always_ok(_: &Path, step: &Step) -> StepOutcome {
    match step {
        Step::Git(command) if command.starts_with(&["rev-list"]) => StepOutcome::ok_with_output("5"),
        _ => StepOutcome::ok(),
    }
}

fn targets(names: &[&str]) -> Vec<RepositoryTarget> {
    names
        .iter()
        .map(|name| RepositoryTarget::new(*name, PathBuf::from("/subs").join(name)))
        .collect()
}

fn pull_protocols(names: &[&str]) -> Vec<PullProtocol> {
    targets(names).iter().map(PullProtocol::new).collect()
}

#[tokio::test]
async fn test_items_run_strictly_in_order() {
    let executor = ScriptedExecutor::new(always_ok);
    let (_cancel, cancelled) = cancellation_channel();
    let mut runner = BatchRunner::new(executor.clone(), cancelled);
    let mut reporter = RecordingReporter::default();

    let report = runner
        .run(BatchKind::Pull, pull_protocols(&["alice", "bob", "carol"]), &mut reporter)
        .await;

    let log = executor.log();
    assert_eq!(log.len(), 18);
    let owners: Vec<&str> = log
        .iter()
        .map(|line| line.split(':').next().unwrap_or_default())
        .collect();
    assert!(owners[..6].iter().all(|dir| *dir == "/subs/alice"));
    assert!(owners[6..12].iter().all(|dir| *dir == "/subs/bob"));
    assert!(owners[12..].iter().all(|dir| *dir == "/subs/carol"));

    let names: Vec<_> = report.results.iter().map(OperationResult::name).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);
    assert_eq!(report.outcome, BatchOutcome::Completed);
}

#[tokio::test]
async fn test_counters_match_cursor_after_each_item() {
    let executor = ScriptedExecutor::new(|dir, step| {
        if dir.ends_with("bob") {
            StepOutcome::failed("fatal: not a git repository")
        } else {
            always_ok(dir, step)
        }
    });
    let (_cancel, cancelled) = cancellation_channel();
    let mut runner = BatchRunner::new(executor, cancelled);
    let mut reporter = RecordingReporter::default();

    let report = runner
        .run(BatchKind::Pull, pull_protocols(&["alice", "bob", "carol"]), &mut reporter)
        .await;

    let mut finished = 0;
    for event in &reporter.events {
        if let BatchEvent::ItemFinished { index, .. } = event {
            finished += 1;
            assert_eq!(finished, index + 1);
        }
    }
    assert_eq!(report.counters.succeeded + report.counters.failed, report.total);
    assert_eq!(report.counters.failed, 1);
    assert_eq!(
        reporter.results(),
        vec![
            OperationResult::success("alice"),
            OperationResult::failure("bob", "not a repository"),
            OperationResult::success("carol"),
        ]
    );
    assert!(matches!(
        reporter.events.last(),
        Some(BatchEvent::Done { total: 3, .. })
    ));
}

#[tokio::test]
async fn test_empty_batch_is_nothing_to_do() {
    let executor = ScriptedExecutor::new(always_ok);
    let (_cancel, cancelled) = cancellation_channel();
    let mut runner = BatchRunner::new(executor.clone(), cancelled);
    let mut reporter = RecordingReporter::default();

    let report = runner.run(BatchKind::Pull, pull_protocols(&[]), &mut reporter).await;

    assert_eq!(report.outcome, BatchOutcome::NothingToDo);
    assert!(executor.log().is_empty());
    assert_eq!(
        reporter.events,
        vec![BatchEvent::NothingToDo {
            kind: BatchKind::Pull
        }]
    );
}

#[tokio::test]
async fn test_cancel_before_start_runs_nothing() {
    let executor = ScriptedExecutor::new(always_ok);
    let (cancel, cancelled) = cancellation_channel();
    cancel.send(true).unwrap();
    let mut runner = BatchRunner::new(executor.clone(), cancelled);
    let mut reporter = RecordingReporter::default();

    let report = runner
        .run(BatchKind::Pull, pull_protocols(&["alice"]), &mut reporter)
        .await;

    assert_eq!(report.outcome, BatchOutcome::Cancelled);
    assert!(report.results.is_empty());
    assert!(executor.log().is_empty());
}

/// Blocks every step until released
struct BlockingExecutor {
    started: Notify,
    release: Notify,
    finished: AtomicBool,
}

#[async_trait]
impl StepExecutor for BlockingExecutor {
    async fn execute(&self, _step: Step) -> StepOutcome {
        self.started.notify_one();
        self.release.notified().await;
        self.finished.store(true, Ordering::SeqCst);
        StepOutcome::ok()
    }
}

#[tokio::test]
async fn test_cancel_detaches_in_flight_step() {
    let executor = Arc::new(BlockingExecutor {
        started: Notify::new(),
        release: Notify::new(),
        finished: AtomicBool::new(false),
    });
    let (cancel, cancelled) = cancellation_channel();
    let mut runner = BatchRunner::new(executor.clone(), cancelled);
    let mut reporter = RecordingReporter::default();

    let run = runner.run(BatchKind::Pull, pull_protocols(&["alice", "bob"]), &mut reporter);
    let cancel_when_started = async {
        executor.started.notified().await;
        cancel.send(true).unwrap();
    };
    let (report, ()) = tokio::join!(run, cancel_when_started);

    assert_eq!(report.outcome, BatchOutcome::Cancelled);
    assert!(report.results.is_empty());
    assert_eq!(report.counters.processed(), 0);
    assert!(!executor.finished.load(Ordering::SeqCst));
    assert!(matches!(
        reporter.events.last(),
        Some(BatchEvent::Cancelled { total: 2, .. })
    ));

    // The abandoned step still runs to completion
    executor.release.notify_one();
    tokio::time::timeout(Duration::from_secs(5), async {
        while !executor.finished.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("detached step should finish");
}
