use std::path::PathBuf;

use tracing::debug;

use super::{Protocol, PullProtocol, Transition};
use crate::batch::step::{Step, StepOutcome};
use crate::core::config::{NO_FEEDBACK_FILE_MESSAGE, NOTHING_TO_COMMIT_NOTE};
use crate::core::discovery::RepositoryTarget;
use crate::git::{GitCommand, OperationResult};

/// Destination file name and commit message for delivered feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOptions {
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// No feedback file was paired with the target
    Unpaired,
    Pulling,
    Reset,
    Stash,
    Copy,
    Add,
    Status,
    Commit,
    Push,
    StashPop,
    Finished,
}

/// Pulls, then delivers the paired feedback file and pushes it
#[derive(Debug)]
pub struct PushProtocol {
    name: String,
    dir: PathBuf,
    feedback_file: PathBuf,
    options: PushOptions,
    pull: PullProtocol,
    stage: Stage,
    stashed: bool,
    pending: Option<OperationResult>,
}

impl PushProtocol {
    pub fn new(target: &RepositoryTarget, options: PushOptions) -> Self {
        let (feedback_file, stage) = match &target.paired_feedback_file {
            Some(file) => (file.clone(), Stage::Pulling),
            None => (PathBuf::new(), Stage::Unpaired),
        };
        Self {
            name: target.name.clone(),
            dir: target.local_path.clone(),
            feedback_file,
            options,
            pull: PullProtocol::new(target),
            stage,
            stashed: false,
            pending: None,
        }
    }

    fn run(&mut self, stage: Stage, step: Step) -> Transition {
        self.stage = stage;
        Transition::Run(step)
    }

    fn git(&mut self, stage: Stage, command: GitCommand) -> Transition {
        self.run(stage, Step::Git(command))
    }

    fn finish(&mut self, result: OperationResult) -> Transition {
        self.stage = Stage::Finished;
        Transition::Finish(result)
    }

    fn settle(&mut self, result: OperationResult) -> Transition {
        if self.stashed {
            self.pending = Some(result);
            self.git(Stage::StashPop, GitCommand::stash_pop(&self.dir))
        } else {
            self.finish(result)
        }
    }

    fn fail(&mut self, reason: String) -> Transition {
        let failure = OperationResult::failure(&self.name, reason);
        self.settle(failure)
    }

    /// Forwards a transition of the embedded pull
    fn after_pull(&mut self, transition: Transition) -> Transition {
        match transition {
            Transition::Run(step) => Transition::Run(step),
            Transition::Finish(result) if !result.is_success() => self.finish(result),
            Transition::Finish(_) => self.git(Stage::Reset, GitCommand::reset(&self.dir)),
        }
    }
}

impl Protocol for PushProtocol {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self) -> Transition {
        if self.stage == Stage::Unpaired {
            let failure = OperationResult::failure(&self.name, NO_FEEDBACK_FILE_MESSAGE);
            return self.finish(failure);
        }
        self.stage = Stage::Pulling;
        let transition = self.pull.start();
        self.after_pull(transition)
    }

    fn resume(&mut self, outcome: StepOutcome) -> Transition {
        match self.stage {
            Stage::Pulling => {
                let transition = self.pull.resume(outcome);
                self.after_pull(transition)
            }
            // reset only clears the index; its outcome does not matter
            Stage::Reset => self.git(Stage::Stash, GitCommand::stash_push(&self.dir)),
            Stage::Stash => {
                self.stashed = outcome.success;
                let from = self.feedback_file.clone();
                let to = self.dir.join(&self.options.filename);
                self.run(Stage::Copy, Step::CopyFile { from, to })
            }
            Stage::Copy => {
                if !outcome.success {
                    debug!("{}: copy failed: {:?}", self.name, outcome.first_error_line());
                    let reason = format!("error copying feedback file: {}", self.options.filename);
                    return self.fail(reason);
                }
                let add = GitCommand::add(&self.dir, &self.options.filename);
                self.git(Stage::Add, add)
            }
            Stage::Add => {
                if !outcome.success {
                    let reason = format!("failed to add {}", self.options.filename);
                    return self.fail(reason);
                }
                self.git(Stage::Status, GitCommand::status_porcelain(&self.dir))
            }
            Stage::Status => {
                if !outcome.success {
                    return self.fail("failed to read status".to_string());
                }
                if outcome.stdout.trim().is_empty() {
                    let clean = OperationResult::success_with_note(&self.name, NOTHING_TO_COMMIT_NOTE);
                    return self.settle(clean);
                }
                let commit = GitCommand::commit(&self.dir, &self.options.message);
                self.git(Stage::Commit, commit)
            }
            Stage::Commit => {
                if !outcome.success {
                    return self.fail("failed to commit".to_string());
                }
                self.git(Stage::Push, GitCommand::push(&self.dir))
            }
            Stage::Push => {
                if !outcome.success {
                    return self.fail("failed to push".to_string());
                }
                let pushed = OperationResult::success(&self.name);
                self.settle(pushed)
            }
            Stage::StashPop => {
                if !outcome.success {
                    debug!("{}: stash pop failed: {:?}", self.name, outcome.first_error_line());
                }
                let result = self
                    .pending
                    .take()
                    .unwrap_or_else(|| OperationResult::success(&self.name));
                self.finish(result)
            }
            Stage::Unpaired => self.start(),
            Stage::Finished => {
                let result = self
                    .pending
                    .take()
                    .unwrap_or_else(|| OperationResult::success(&self.name));
                Transition::Finish(result)
            }
        }
    }
}
