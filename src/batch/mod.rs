//! Batch orchestration: protocols, steps and the sequential runner

pub mod events;
pub mod protocol;
pub mod runner;
pub mod state;
pub mod step;

pub use events::{BatchEvent, BatchReporter, RecordingReporter};
pub use protocol::{
    CloneProtocol, CloneTarget, Protocol, PullProtocol, PushOptions, PushProtocol, Transition,
};
pub use runner::{cancellation_channel, BatchOutcome, BatchReport, BatchRunner};
pub use state::{BatchCounters, BatchKind, BatchState, Phase};
pub use step::{Step, StepExecutor, StepOutcome, SystemExecutor};
