//! Statistics tracking for batch operations

use crate::batch::BatchKind;
use crate::core::config::ERROR_MESSAGE_MAX_LENGTH;
use crate::git::OperationResult;
use std::time::Duration;

/// Aggregated results of one batch run
///
/// Fed one result per item, in processing order.
#[derive(Debug, Default, Clone)]
pub struct BatchStatistics {
    pub succeeded: usize,
    pub failed: usize,
    pub failed_repos: Vec<(String, String)>, // (repo_name, reason)
}

impl BatchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics with the result of one item
    pub fn update(&mut self, result: &OperationResult) {
        match result {
            OperationResult::Success { .. } => self.succeeded += 1,
            OperationResult::Failure { name, reason } => {
                self.failed += 1;
                self.failed_repos.push((name.clone(), reason.clone()));
            }
        }
    }

    /// One-line summary shown after the batch completes
    pub fn generate_summary(&self, kind: BatchKind, duration: Duration) -> String {
        let duration_secs = duration.as_secs_f64();
        let noun = if self.succeeded == 1 {
            "repository"
        } else {
            "repositories"
        };

        if self.failed > 0 {
            format!(
                "✅ {} {} {} in {:.1}s • {} failed",
                kind.past_tense(),
                self.succeeded,
                noun,
                duration_secs,
                self.failed
            )
        } else {
            format!(
                "✅ {} {} {} in {:.1}s",
                kind.past_tense(),
                self.succeeded,
                noun,
                duration_secs
            )
        }
    }

    /// Lists failed repositories again, after the run
    pub fn generate_detailed_summary(&self) -> String {
        if self.failed_repos.is_empty() {
            return String::new();
        }

        let mut lines = vec![format!("🔴 FAILED REPOS ({})", self.failed_repos.len())];
        for (i, (repo_name, reason)) in self.failed_repos.iter().enumerate() {
            let tree_char = if i == self.failed_repos.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            lines.push(format!(
                "   {} {:30} # {}",
                tree_char,
                repo_name,
                clean_error_message(reason)
            ));
        }
        lines.join("\n")
    }
}

/// Collapses whitespace and truncates long messages for display
pub(crate) fn clean_error_message(error: &str) -> String {
    let cleaned = error.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.chars().count() > ERROR_MESSAGE_MAX_LENGTH {
        let truncated: String = cleaned.chars().take(ERROR_MESSAGE_MAX_LENGTH - 3).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}
