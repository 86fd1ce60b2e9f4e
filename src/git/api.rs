//! Public API for git operations.
//!
//! - Running git in an explicit working directory
//! - Probing whether a directory is the root of a working tree
//! - The literal argument vectors used by the batch protocols
//! - Per-repository operation results
//!
//! ## Example: probing a directory
//!
//! ```rust,no_run
//! use classroom_repos::git::is_repository_root;
//! use std::path::Path;
//!
//! async fn check(path: &Path) {
//!     if is_repository_root(path).await {
//!         println!("{} is a repository", path.display());
//!     }
//! }
//! ```

pub use super::commands::GitCommand;
pub use super::operations::{is_repository_root, run_git, show_toplevel, GitOutput};
pub use super::status::{CommitCountSnapshot, OperationResult};
