//! Semantic events emitted by the batch runner

use super::state::{BatchCounters, BatchKind};
use crate::git::OperationResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Started {
        kind: BatchKind,
        total: usize,
    },
    ItemStarted {
        index: usize,
        total: usize,
        name: String,
    },
    /// A step of the current item was dispatched
    StepStarted {
        name: String,
        description: String,
    },
    ItemFinished {
        index: usize,
        result: OperationResult,
    },
    Done {
        kind: BatchKind,
        counters: BatchCounters,
        total: usize,
    },
    /// The target list was empty
    NothingToDo {
        kind: BatchKind,
    },
    Cancelled {
        kind: BatchKind,
        counters: BatchCounters,
        total: usize,
    },
}

/// Receives batch events; rendering is entirely up to the implementation
pub trait BatchReporter {
    fn report(&mut self, event: &BatchEvent);
}

/// Keeps every event, in order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<BatchEvent>,
}

impl BatchReporter for RecordingReporter {
    fn report(&mut self, event: &BatchEvent) {
        self.events.push(event.clone());
    }
}

impl RecordingReporter {
    /// Results in the order they were reported
    pub fn results(&self) -> Vec<OperationResult> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BatchEvent::ItemFinished { result, .. } => Some(result.clone()),
                _ => None,
            })
            .collect()
    }
}
