//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Repository discovery and feedback file pairing
//! - Feedback file rendering
//! - Progress reporting and statistics
//!
//! Internal implementation details are not exposed through this API.

// Discovery
pub use super::discovery::{
    list_repository_directories, pair_entries, pair_feedback_files, parse_feedback_file_name,
    DiscoveryError, FeedbackFileName, OrphanSets, Pairing, RepositoryTarget,
};

// Feedback files
pub use super::feedback::{feedback_file_name, CommitStamp, FeedbackTemplate};

// Reporting
pub use super::progress::{print_orphan_warnings, ProgressReporter};
pub use super::stats::BatchStatistics;

// Configuration
pub use super::config::{APP_NAME, GIT_OPERATION_TIMEOUT_SECS, SUBMISSIONS_DIR_SUFFIX};

// User-facing messages
pub use super::config::{LAYOUT_HELP, NO_REPOS_MESSAGE};
