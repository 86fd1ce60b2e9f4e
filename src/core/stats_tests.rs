//! Unit tests for BatchStatistics
//! These are in a separate file to keep stats.rs clean

#[cfg(test)]
mod tests {
    use crate::batch::BatchKind;
    use crate::core::stats::{clean_error_message, BatchStatistics};
    use crate::git::OperationResult;
    use std::time::Duration;

    fn scenario() -> BatchStatistics {
        let mut stats = BatchStatistics::new();
        stats.update(&OperationResult::success("alice"));
        stats.update(&OperationResult::success_with_note("bob", "new commits"));
        stats.update(&OperationResult::failure("carol", "not a repository"));
        stats
    }

    #[test]
    fn test_statistics_initialization() {
        let stats = BatchStatistics::new();
        assert_eq!(stats.succeeded, 0);
        assert_eq!(stats.failed, 0);
        assert!(stats.failed_repos.is_empty());
    }

    #[test]
    fn test_update_counts_each_result_once() {
        let stats = scenario();
        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(
            stats.failed_repos,
            vec![("carol".to_string(), "not a repository".to_string())]
        );
    }

    #[test]
    fn test_summary_shows_both_counts() {
        let summary = scenario().generate_summary(BatchKind::Pull, Duration::from_millis(1500));
        assert_eq!(summary, "✅ Pulled 2 repositories in 1.5s • 1 failed");
    }

    #[test]
    fn test_summary_without_failures() {
        let mut stats = BatchStatistics::new();
        stats.update(&OperationResult::success("alice"));
        let summary = stats.generate_summary(BatchKind::Clone, Duration::from_secs(2));
        assert_eq!(summary, "✅ Cloned 1 repository in 2.0s");
    }

    #[test]
    fn test_detailed_summary_lists_failures() {
        let detailed = scenario().generate_detailed_summary();
        assert!(detailed.starts_with("🔴 FAILED REPOS (1)"));
        assert!(detailed.contains("└─ carol"));
        assert!(detailed.contains("# not a repository"));
        assert_eq!(BatchStatistics::new().generate_detailed_summary(), "");
    }

    #[test]
    fn test_clean_error_message() {
        assert_eq!(clean_error_message("failed\n  to   pull"), "failed to pull");
        let long = "x".repeat(200);
        let cleaned = clean_error_message(&long);
        assert!(cleaned.ends_with("..."));
        assert_eq!(cleaned.chars().count(), 80);
    }
}
