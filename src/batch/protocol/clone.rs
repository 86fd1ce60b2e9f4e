use std::path::{Path, PathBuf};

use super::{Protocol, Transition};
use crate::batch::step::{Step, StepOutcome};
use crate::core::config::ALREADY_EXISTS_MESSAGE;
use crate::core::feedback::{feedback_file_name, CommitStamp, FeedbackTemplate};
use crate::git::{GitCommand, OperationResult};

/// A repository to clone and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneTarget {
    pub name: String,
    pub clone_url: String,
    /// `<submissions dir>/<name>`; the feedback file is staged next to it
    pub destination: PathBuf,
}

impl CloneTarget {
    pub fn new(name: impl Into<String>, clone_url: impl Into<String>, submissions: &Path) -> Self {
        let name = name.into();
        Self {
            destination: submissions.join(&name),
            name,
            clone_url: clone_url.into(),
        }
    }

    fn staging_dir(&self) -> &Path {
        self.destination.parent().unwrap_or(Path::new("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Clone,
    ShortHead,
    CommitDate,
    CreateFeedback,
    Finished,
}

/// Clones one repository and stages an initial feedback file for it
#[derive(Debug)]
pub struct CloneProtocol {
    target: CloneTarget,
    template: FeedbackTemplate,
    stage: Stage,
    short_hash: String,
}

impl CloneProtocol {
    pub fn new(target: CloneTarget, template: FeedbackTemplate) -> Self {
        Self {
            target,
            template,
            stage: Stage::Clone,
            short_hash: String::new(),
        }
    }

    fn run(&mut self, stage: Stage, step: Step) -> Transition {
        self.stage = stage;
        Transition::Run(step)
    }

    fn finish(&mut self, result: OperationResult) -> Transition {
        self.stage = Stage::Finished;
        Transition::Finish(result)
    }

    fn create_feedback(&mut self, stamp: Option<CommitStamp>) -> Transition {
        let path = self
            .target
            .staging_dir()
            .join(feedback_file_name(&self.target.name));
        let contents = self.template.render(stamp.as_ref());
        self.run(Stage::CreateFeedback, Step::CreateFile { path, contents })
    }
}

impl Protocol for CloneProtocol {
    fn name(&self) -> &str {
        &self.target.name
    }

    fn start(&mut self) -> Transition {
        // Anything at the destination, even a dangling link, blocks the clone
        if self.target.destination.symlink_metadata().is_ok() {
            let skipped = OperationResult::failure(&self.target.name, ALREADY_EXISTS_MESSAGE);
            return self.finish(skipped);
        }
        let clone = GitCommand::clone_into(
            self.target.staging_dir(),
            &self.target.clone_url,
            &self.target.destination,
        );
        self.run(Stage::Clone, Step::Git(clone))
    }

    fn resume(&mut self, outcome: StepOutcome) -> Transition {
        match self.stage {
            Stage::Clone => {
                if !outcome.success {
                    let reason = match outcome.first_error_line() {
                        Some(line) => format!("failed to clone: {line}"),
                        None => "failed to clone".to_string(),
                    };
                    let failure = OperationResult::failure(&self.target.name, reason);
                    return self.finish(failure);
                }
                let head = GitCommand::short_head(&self.target.destination);
                self.run(Stage::ShortHead, Step::Git(head))
            }
            Stage::ShortHead => {
                if !outcome.success {
                    // Empty repository: no commit to stamp
                    return self.create_feedback(None);
                }
                self.short_hash = outcome.stdout;
                let date = GitCommand::commit_date(&self.target.destination);
                self.run(Stage::CommitDate, Step::Git(date))
            }
            Stage::CommitDate => {
                let date = if outcome.success { outcome.stdout.as_str() } else { "" };
                let stamp = CommitStamp::new(&self.short_hash, date);
                self.create_feedback(stamp)
            }
            Stage::CreateFeedback => {
                let result = if outcome.success {
                    OperationResult::success(&self.target.name)
                } else {
                    let reason = format!(
                        "unable to create feedback file: {}",
                        outcome.first_error_line().unwrap_or("unknown error")
                    );
                    OperationResult::failure(&self.target.name, reason)
                };
                self.finish(result)
            }
            Stage::Finished => Transition::Finish(OperationResult::success(&self.target.name)),
        }
    }
}
