//! Sequential batch control loop

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::events::{BatchEvent, BatchReporter};
use super::protocol::{Protocol, Transition};
use super::state::{BatchCounters, BatchKind, BatchState, Phase};
use super::step::{Step, StepExecutor, StepOutcome, SystemExecutor};
use crate::git::OperationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    Completed,
    /// The target list was empty
    NothingToDo,
    Cancelled,
}

/// Everything one batch run produced
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub kind: BatchKind,
    pub total: usize,
    pub results: Vec<OperationResult>,
    pub counters: BatchCounters,
    pub outcome: BatchOutcome,
}

/// Creates the channel used to request cancellation of a running batch
pub fn cancellation_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Drives protocols one item at a time, with at most one step in flight
pub struct BatchRunner {
    executor: Arc<dyn StepExecutor>,
    cancel: watch::Receiver<bool>,
}

impl BatchRunner {
    pub fn new(executor: Arc<dyn StepExecutor>, cancel: watch::Receiver<bool>) -> Self {
        Self { executor, cancel }
    }

    /// Runner backed by the real git binary and filesystem
    pub fn system(cancel: watch::Receiver<bool>) -> Self {
        Self::new(Arc::new(SystemExecutor), cancel)
    }

    pub async fn run<P: Protocol>(
        &mut self,
        kind: BatchKind,
        protocols: Vec<P>,
        reporter: &mut dyn BatchReporter,
    ) -> BatchReport {
        let total = protocols.len();
        let mut state = BatchState::new(total);
        let mut results = Vec::with_capacity(total);

        if total == 0 {
            info!("{kind}: nothing to do");
            reporter.report(&BatchEvent::NothingToDo { kind });
            return BatchReport {
                kind,
                total,
                results,
                counters: state.counters(),
                outcome: BatchOutcome::NothingToDo,
            };
        }

        info!("{kind}: starting batch of {total} repositories");
        reporter.report(&BatchEvent::Started { kind, total });

        for mut protocol in protocols {
            if self.is_cancelled() {
                state.cancel();
                break;
            }
            let Some(index) = state.begin_item() else {
                break;
            };
            reporter.report(&BatchEvent::ItemStarted {
                index,
                total,
                name: protocol.name().to_string(),
            });

            let Some(result) = self.drive(&mut protocol, reporter).await else {
                state.cancel();
                break;
            };

            state.record(&result);
            reporter.report(&BatchEvent::ItemFinished {
                index,
                result: result.clone(),
            });
            results.push(result);
        }

        let counters = state.counters();
        let outcome = if state.phase() == Phase::Cancelled {
            warn!("{kind}: cancelled after {} of {total}", counters.processed());
            reporter.report(&BatchEvent::Cancelled {
                kind,
                counters,
                total,
            });
            BatchOutcome::Cancelled
        } else {
            info!(
                "{kind}: finished, {} succeeded, {} failed",
                counters.succeeded, counters.failed
            );
            reporter.report(&BatchEvent::Done {
                kind,
                counters,
                total,
            });
            BatchOutcome::Completed
        };

        BatchReport {
            kind,
            total,
            results,
            counters,
            outcome,
        }
    }

    /// Runs one protocol to completion; `None` when cancelled mid-item
    async fn drive<P: Protocol>(
        &mut self,
        protocol: &mut P,
        reporter: &mut dyn BatchReporter,
    ) -> Option<OperationResult> {
        let mut transition = protocol.start();
        loop {
            match transition {
                Transition::Finish(result) => return Some(result),
                Transition::Run(step) => {
                    reporter.report(&BatchEvent::StepStarted {
                        name: protocol.name().to_string(),
                        description: step.to_string(),
                    });
                    let outcome = self.dispatch(step).await?;
                    transition = protocol.resume(outcome);
                }
            }
        }
    }

    /// Executes a step on its own task, racing it against cancellation
    ///
    /// On cancellation the task is detached: it runs to completion and its
    /// outcome is dropped.
    async fn dispatch(&mut self, step: Step) -> Option<StepOutcome> {
        debug!("dispatching {step}");
        let executor = Arc::clone(&self.executor);
        let mut handle = tokio::spawn(async move { executor.execute(step).await });

        tokio::select! {
            joined = &mut handle => Some(match joined {
                Ok(outcome) => outcome,
                Err(e) => StepOutcome::failed(e.to_string()),
            }),
            _ = wait_for_cancel(&mut self.cancel) => {
                warn!("cancellation requested, abandoning in-flight step");
                None
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }
}

async fn wait_for_cancel(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|cancelled| *cancelled).await.is_err() {
        // Sender gone: cancellation can no longer be requested
        std::future::pending::<()>().await;
    }
}
