//! Per-repository state machines
//!
//! A protocol never runs a subprocess or writes a file itself. It hands the
//! runner one [`Step`] at a time and is resumed with that step's
//! [`StepOutcome`] until it finishes with an [`OperationResult`].

mod clone;
mod pull;
mod push;

pub use clone::{CloneProtocol, CloneTarget};
pub use pull::PullProtocol;
pub use push::{PushOptions, PushProtocol};

use super::step::{Step, StepOutcome};
use crate::git::OperationResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Execute this step and resume with its outcome
    Run(Step),
    Finish(OperationResult),
}

pub trait Protocol: Send {
    /// Repository name shown in progress and results
    fn name(&self) -> &str;

    fn start(&mut self) -> Transition;

    fn resume(&mut self, outcome: StepOutcome) -> Transition;
}
