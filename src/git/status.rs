//! Per-repository operation results

use std::fmt;

/// Outcome of one batch operation (clone, pull or push) on one repository
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationResult {
    /// The operation finished; `note` qualifies the success (e.g. "new commits")
    Success { name: String, note: Option<String> },
    /// The operation failed; `reason` is shown to the user as is
    Failure { name: String, reason: String },
}

impl OperationResult {
    pub fn success(name: impl Into<String>) -> Self {
        Self::Success {
            name: name.into(),
            note: None,
        }
    }

    pub fn success_with_note(name: impl Into<String>, note: impl Into<String>) -> Self {
        Self::Success {
            name: name.into(),
            note: Some(note.into()),
        }
    }

    pub fn failure(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failure {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Repository name the result belongs to
    pub fn name(&self) -> &str {
        match self {
            Self::Success { name, .. } | Self::Failure { name, .. } => name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the emoji symbol for this result
    pub fn symbol(&self) -> &str {
        match self {
            Self::Success { note: None, .. } => "🟢",
            Self::Success { note: Some(_), .. } => "🟡",
            Self::Failure { .. } => "🔴",
        }
    }

    /// Note or failure reason, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Success { note, .. } => note.as_deref(),
            Self::Failure { reason, .. } => Some(reason),
        }
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{} {}  {}", self.symbol(), self.name(), detail),
            None => write!(f, "{} {}", self.symbol(), self.name()),
        }
    }
}

/// Total number of commits reachable in a repository at one point in time
///
/// Only ever compared for equality. A failed count query is represented by an
/// empty snapshot, so two failed queries compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitCountSnapshot(Option<u64>);

impl CommitCountSnapshot {
    /// Builds a snapshot from `git rev-list --all --count` output
    pub fn from_output(success: bool, stdout: &str) -> Self {
        if !success {
            return Self(None);
        }
        Self(stdout.trim().parse().ok())
    }
}
