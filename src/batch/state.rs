//! Cursor and counters owned by one batch run

use std::fmt;

use crate::git::OperationResult;

/// The three batch operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Clone,
    Pull,
    Push,
}

impl BatchKind {
    /// Present-progressive verb used in the start line ("Pulling 3 repositories")
    pub fn verb(&self) -> &'static str {
        match self {
            BatchKind::Clone => "Cloning",
            BatchKind::Pull => "Pulling",
            BatchKind::Push => "Grading",
        }
    }

    /// Past-tense verb used in the summary line ("Pulled 3 repositories")
    pub fn past_tense(&self) -> &'static str {
        match self {
            BatchKind::Clone => "Cloned",
            BatchKind::Pull => "Pulled",
            BatchKind::Push => "Graded",
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchKind::Clone => "clone",
            BatchKind::Pull => "pull",
            BatchKind::Push => "push",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounters {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchCounters {
    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Processing the item at this index
    Running(usize),
    Done,
    Cancelled,
}

/// Tracks progress through a target list of known length
///
/// The cursor only moves forward, once per recorded result. After a result
/// is recorded `succeeded + failed == cursor + 1` until the cursor advances.
#[derive(Debug, Clone)]
pub struct BatchState {
    total: usize,
    cursor: usize,
    counters: BatchCounters,
    phase: Phase,
}

impl BatchState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            cursor: 0,
            counters: BatchCounters::default(),
            phase: if total == 0 { Phase::Done } else { Phase::Idle },
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn counters(&self) -> BatchCounters {
        self.counters
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Marks the item under the cursor as in progress and returns its index
    pub fn begin_item(&mut self) -> Option<usize> {
        match self.phase {
            Phase::Idle | Phase::Running(_) if self.cursor < self.total => {
                self.phase = Phase::Running(self.cursor);
                Some(self.cursor)
            }
            _ => None,
        }
    }

    /// Records the result of the item under the cursor, then advances
    ///
    /// Returns false once the last item has been recorded.
    pub fn record(&mut self, result: &OperationResult) -> bool {
        if !matches!(self.phase, Phase::Running(_)) {
            return false;
        }
        if result.is_success() {
            self.counters.succeeded += 1;
        } else {
            self.counters.failed += 1;
        }
        debug_assert_eq!(self.counters.processed(), self.cursor + 1);

        if self.cursor + 1 >= self.total {
            self.phase = Phase::Done;
            false
        } else {
            self.cursor += 1;
            true
        }
    }

    pub fn cancel(&mut self) {
        if self.phase != Phase::Done {
            self.phase = Phase::Cancelled;
        }
    }
}
