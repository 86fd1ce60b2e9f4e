use std::path::PathBuf;

use tracing::{debug, warn};

use super::{Protocol, Transition};
use crate::batch::step::{Step, StepOutcome};
use crate::core::config::{NEW_COMMITS_NOTE, NOT_A_REPOSITORY_MESSAGE, PULL_FAILED_MESSAGE};
use crate::core::discovery::RepositoryTarget;
use crate::git::{CommitCountSnapshot, GitCommand, OperationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Reset,
    Stash,
    CountBefore,
    Pull,
    CountAfter,
    StashPop,
    Finished,
}

/// Brings a local copy up to date with `pull --rebase`, keeping local changes
///
/// Local changes are stashed around the pull and restored afterwards. The
/// commit count is sampled before and after so that incoming commits can be
/// reported.
///
/// `git stash -a -q` exits 0 even when there is nothing to stash, so the
/// later `stash pop` can restore an older entry already on the stash stack.
#[derive(Debug)]
pub struct PullProtocol {
    name: String,
    dir: PathBuf,
    stage: Stage,
    stashed: bool,
    before: CommitCountSnapshot,
    pending: Option<OperationResult>,
}

impl PullProtocol {
    pub fn new(target: &RepositoryTarget) -> Self {
        Self {
            name: target.name.clone(),
            dir: target.local_path.clone(),
            stage: Stage::Reset,
            stashed: false,
            before: CommitCountSnapshot::default(),
            pending: None,
        }
    }

    fn run(&mut self, stage: Stage, command: GitCommand) -> Transition {
        self.stage = stage;
        Transition::Run(Step::Git(command))
    }

    fn finish(&mut self, result: OperationResult) -> Transition {
        self.stage = Stage::Finished;
        Transition::Finish(result)
    }

    /// Restores the stash (when one was made) before reporting `result`
    fn settle(&mut self, result: OperationResult) -> Transition {
        if self.stashed {
            self.pending = Some(result);
            self.run(Stage::StashPop, GitCommand::stash_pop(&self.dir))
        } else {
            self.finish(result)
        }
    }
}

impl Protocol for PullProtocol {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self) -> Transition {
        self.run(Stage::Reset, GitCommand::reset(&self.dir))
    }

    fn resume(&mut self, outcome: StepOutcome) -> Transition {
        match self.stage {
            Stage::Reset => {
                if !outcome.success {
                    let failure = OperationResult::failure(&self.name, NOT_A_REPOSITORY_MESSAGE);
                    return self.finish(failure);
                }
                self.run(Stage::Stash, GitCommand::stash_push(&self.dir))
            }
            Stage::Stash => {
                self.stashed = outcome.success;
                self.run(Stage::CountBefore, GitCommand::commit_count(&self.dir))
            }
            Stage::CountBefore => {
                self.before = CommitCountSnapshot::from_output(outcome.success, &outcome.stdout);
                self.run(Stage::Pull, GitCommand::pull_rebase(&self.dir))
            }
            Stage::Pull => {
                if !outcome.success {
                    if let Some(line) = outcome.first_error_line() {
                        warn!("{}: pull failed: {}", self.name, line);
                    }
                    let failure = OperationResult::failure(&self.name, PULL_FAILED_MESSAGE);
                    return self.settle(failure);
                }
                self.run(Stage::CountAfter, GitCommand::commit_count(&self.dir))
            }
            Stage::CountAfter => {
                let after = CommitCountSnapshot::from_output(outcome.success, &outcome.stdout);
                let result = if after != self.before {
                    OperationResult::success_with_note(&self.name, NEW_COMMITS_NOTE)
                } else {
                    OperationResult::success(&self.name)
                };
                self.settle(result)
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
