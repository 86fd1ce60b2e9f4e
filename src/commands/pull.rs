//! Pull command: bring every local copy in a submissions directory up to date

use anyhow::Result;
use tokio::sync::watch;

use crate::batch::{BatchKind, BatchReport, BatchRunner, PullProtocol};
use crate::core::{list_repository_directories, ProgressReporter};
use crate::utils::{expand_home, TerminalTitle};

/// Handles the pull command
pub async fn handle_pull_command(
    directory: &str,
    cancel: watch::Receiver<bool>,
) -> Result<BatchReport> {
    let _title = TerminalTitle::running("pull");

    let source = expand_home(directory);
    let targets = list_repository_directories(&source)?;
    let protocols: Vec<PullProtocol> = targets.iter().map(PullProtocol::new).collect();

    let mut reporter = ProgressReporter::new()?;
    let mut runner = BatchRunner::system(cancel);
    Ok(runner.run(BatchKind::Pull, protocols, &mut reporter).await)
}
