//! # classroom-repos
//!
//! `classroom-repos` automates the grading round trip for GitHub Classroom
//! student repositories. It powers the `classroom` CLI tool.
//!
//! ## Core Features
//!
//! - **Clone**: Fetch every accepted assignment and stage a feedback file per repository.
//! - **Pull**: Bring local copies up to date, reporting repositories with new commits.
//! - **Push**: Deliver each feedback file to its repository, then commit and push it.
//!
//! Repositories are processed strictly one at a time through the `git` binary;
//! a failure in one repository never stops the others.
//!
//! ## Example
//!
//! ```rust,no_run
//! use classroom_repos::batch::{cancellation_channel, BatchKind, BatchRunner, PullProtocol, RecordingReporter};
//! use classroom_repos::core::list_repository_directories;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let targets = list_repository_directories(Path::new("lab-1-submissions"))?;
//!     let protocols: Vec<PullProtocol> = targets.iter().map(PullProtocol::new).collect();
//!
//!     let (_cancel, cancelled) = cancellation_channel();
//!     let mut reporter = RecordingReporter::default();
//!     let report = BatchRunner::system(cancelled)
//!         .run(BatchKind::Pull, protocols, &mut reporter)
//!         .await;
//!     println!("{} succeeded, {} failed", report.counters.succeeded, report.counters.failed);
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod classroom;
pub mod commands;
pub mod core;
pub mod credentials;
pub mod git;
pub mod settings;
pub mod utils;
