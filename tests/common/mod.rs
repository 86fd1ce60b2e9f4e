//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;

pub use self::fixtures::SubmissionsFixture;
pub use self::git::{commit_count, git, is_git_available, setup_git_repo};

use classroom_repos::batch::{
    cancellation_channel, BatchKind, BatchReport, BatchRunner, Protocol, RecordingReporter,
};

/// Runs protocols against the real git binary, collecting events
pub async fn run_batch<P: Protocol>(
    kind: BatchKind,
    protocols: Vec<P>,
) -> (BatchReport, RecordingReporter) {
    let (_cancel, cancelled) = cancellation_channel();
    let mut reporter = RecordingReporter::default();
    let report = BatchRunner::system(cancelled)
        .run(kind, protocols, &mut reporter)
        .await;
    (report, reporter)
}
