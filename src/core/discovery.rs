//! Submission directory discovery and feedback file pairing

use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::FEEDBACK_FILE_PATTERN;
use crate::git::is_repository_root;

static FEEDBACK_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(FEEDBACK_FILE_PATTERN).expect("feedback file pattern is a valid regex")
});

/// Input errors: fatal to the whole batch run
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("the submissions directory {} does not exist; run the clone command first", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read the directory {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One unit of batch work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub name: String,
    pub local_path: PathBuf,
    pub paired_feedback_file: Option<PathBuf>,
}

impl RepositoryTarget {
    pub fn new(name: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
            paired_feedback_file: None,
        }
    }
}

/// Entries that could not be paired; reported as warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanSets {
    pub directories_without_feedback_file: BTreeSet<String>,
    pub feedback_files_without_directory: BTreeSet<String>,
}

impl OrphanSets {
    pub fn is_empty(&self) -> bool {
        self.directories_without_feedback_file.is_empty()
            && self.feedback_files_without_directory.is_empty()
    }
}

/// Result of pairing repository directories with feedback files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairing {
    /// Paired targets, in directory enumeration order
    pub targets: Vec<RepositoryTarget>,
    pub orphans: OrphanSets,
}

/// Classification of a file name against `grade-<name>.md`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackFileName<'a> {
    NotFeedback,
    Name(&'a str),
    /// The pattern matched but `<name>` itself contains `.md`
    Ambiguous(&'a str),
}

/// Extracts the repository name from a feedback file name
pub fn parse_feedback_file_name(file_name: &str) -> FeedbackFileName<'_> {
    let Some(captures) = FEEDBACK_FILE_REGEX.captures(file_name) else {
        return FeedbackFileName::NotFeedback;
    };
    let Some(name) = captures.name("name") else {
        return FeedbackFileName::NotFeedback;
    };
    let name = name.as_str();
    if name.contains(".md") {
        FeedbackFileName::Ambiguous(name)
    } else {
        FeedbackFileName::Name(name)
    }
}

#[derive(Debug)]
struct ListedEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
    is_file: bool,
}

/// Lists a directory sorted by file name
fn list_entries(source: &Path) -> Result<Vec<ListedEntry>, DiscoveryError> {
    if !source.exists() {
        return Err(DiscoveryError::NotFound(source.to_path_buf()));
    }
    let read_dir = fs::read_dir(source).map_err(|source_err| DiscoveryError::Unreadable {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source_err| DiscoveryError::Unreadable {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        // Non UTF-8 names can never match a repository name
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        entries.push(ListedEntry {
            name,
            path: entry.path(),
            is_dir: file_type.is_dir(),
            is_file: file_type.is_file(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

/// Lists the repository directories of a submissions directory for clone and pull
///
/// Every directory entry becomes a target, repository or not; the pull
/// protocol reports non-repositories itself.
pub fn list_repository_directories(source: &Path) -> Result<Vec<RepositoryTarget>, DiscoveryError> {
    let targets: Vec<RepositoryTarget> = list_entries(source)?
        .into_iter()
        .filter(|entry| entry.is_dir)
        .map(|entry| RepositoryTarget::new(entry.name, absolute(entry.path)))
        .collect();
    debug!(count = targets.len(), source = %source.display(), "listed repository directories");
    Ok(targets)
}

/// Pairs repository directories with `grade-<name>.md` feedback files
///
/// `directories` and `feedback_files` are `(name, path)` pairs in enumeration
/// order; feedback names are file names. Directories must already be known
/// to be repositories.
pub fn pair_entries(
    directories: Vec<(String, PathBuf)>,
    feedback_files: Vec<(String, PathBuf)>,
) -> Pairing {
    let mut orphans = OrphanSets::default();
    let mut by_name: HashMap<String, PathBuf> = HashMap::with_capacity(feedback_files.len());

    for (file_name, path) in &feedback_files {
        match parse_feedback_file_name(file_name) {
            FeedbackFileName::Name(name) => {
                by_name.insert(name.to_string(), path.clone());
            }
            FeedbackFileName::Ambiguous(name) => {
                orphans
                    .feedback_files_without_directory
                    .insert(name.to_string());
            }
            FeedbackFileName::NotFeedback => {}
        }
    }

    let mut targets = Vec::new();
    for (name, path) in directories {
        match by_name.remove(&name) {
            Some(feedback) => targets.push(RepositoryTarget {
                name,
                local_path: path,
                paired_feedback_file: Some(feedback),
            }),
            None => {
                orphans.directories_without_feedback_file.insert(name);
            }
        }
    }
    orphans
        .feedback_files_without_directory
        .extend(by_name.into_keys());

    Pairing { targets, orphans }
}

/// Discovers repository/feedback pairs for the push operation
///
/// A directory qualifies only if git reports it as the top level of its own
/// working tree; other directories are dropped silently.
pub async fn pair_feedback_files(source: &Path) -> Result<Pairing, DiscoveryError> {
    let entries = list_entries(source)?;

    let mut directories = Vec::new();
    let mut feedback_files = Vec::new();
    for entry in entries {
        if entry.is_dir {
            let path = absolute(entry.path);
            if is_repository_root(&path).await {
                directories.push((entry.name, path));
            } else {
                debug!(directory = %entry.name, "skipping directory that is not a repository root");
            }
        } else if entry.is_file {
            feedback_files.push((entry.name, absolute(entry.path)));
        }
    }

    let pairing = pair_entries(directories, feedback_files);
    if !pairing.orphans.is_empty() {
        warn!(
            directories = pairing.orphans.directories_without_feedback_file.len(),
            feedback_files = pairing.orphans.feedback_files_without_directory.len(),
            "unpaired entries in submissions directory"
        );
    }
    Ok(pairing)
}
