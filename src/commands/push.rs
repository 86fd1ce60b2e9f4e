//! Push command: deliver each staged feedback file to its repository

use anyhow::Result;
use tokio::sync::watch;

use crate::batch::{BatchKind, BatchReport, BatchRunner, PushProtocol};
use crate::core::{pair_feedback_files, print_orphan_warnings, ProgressReporter};
use crate::settings::Settings;
use crate::utils::{expand_home, TerminalTitle};

/// Handles the push command
pub async fn handle_push_command(
    directory: &str,
    settings: &Settings,
    cancel: watch::Receiver<bool>,
) -> Result<BatchReport> {
    let _title = TerminalTitle::running("push");

    let source = expand_home(directory);
    let pairing = pair_feedback_files(&source).await?;
    print_orphan_warnings(&pairing.orphans);

    let options = settings.push_options();
    let protocols: Vec<PushProtocol> = pairing
        .targets
        .iter()
        .map(|target| PushProtocol::new(target, options.clone()))
        .collect();

    let mut reporter = ProgressReporter::new()?;
    let mut runner = BatchRunner::system(cancel);
    Ok(runner.run(BatchKind::Push, protocols, &mut reporter).await)
}
