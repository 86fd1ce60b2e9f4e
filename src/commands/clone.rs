//! Clone command: fetch every accepted assignment of a Classroom assignment

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::sync::watch;

use crate::batch::{BatchKind, BatchReport, BatchRunner, CloneProtocol, CloneTarget};
use crate::classroom::ClassroomClient;
use crate::core::{ProgressReporter, SUBMISSIONS_DIR_SUFFIX};
use crate::credentials::resolve_token;
use crate::settings::Settings;
use crate::utils::{expand_home, TerminalTitle};

/// `<parent>/<assignment-slug>-submissions`
pub fn submissions_directory(parent: &Path, assignment_slug: &str) -> PathBuf {
    parent.join(format!("{assignment_slug}{SUBMISSIONS_DIR_SUFFIX}"))
}

/// Handles the clone command
pub async fn handle_clone_command(
    assignment_id: u64,
    directory: &str,
    settings: &Settings,
    cancel: watch::Receiver<bool>,
) -> Result<BatchReport> {
    let _title = TerminalTitle::running("clone");

    let (token, _) = resolve_token(settings)?;
    let client = ClassroomClient::new(token)?;

    println!("🔍 Retrieving accepted assignments...");
    let assignment = client.assignment(assignment_id).await?;
    let accepted = client.accepted_assignments(assignment_id).await?;

    let parent = expand_home(directory);
    let parent = std::path::absolute(&parent).unwrap_or(parent);
    let submissions = submissions_directory(&parent, &assignment.slug);
    if !accepted.is_empty() {
        tokio::fs::create_dir_all(&submissions)
            .await
            .with_context(|| format!("failed to create {}", submissions.display()))?;
        println!("📁 {} → {}", assignment.title, submissions.display());
    }

    let template = settings.feedback_template();
    let protocols: Vec<CloneProtocol> = accepted
        .iter()
        .map(|accepted| {
            let target = CloneTarget::new(
                &accepted.repository.name,
                &accepted.repository.html_url,
                &submissions,
            );
            CloneProtocol::new(target, template.clone())
        })
        .collect();

    let mut reporter = ProgressReporter::new()?;
    let mut runner = BatchRunner::system(cancel);
    Ok(runner.run(BatchKind::Clone, protocols, &mut reporter).await)
}
