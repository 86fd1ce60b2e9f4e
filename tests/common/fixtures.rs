//! Test fixtures and builders

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::{clone_repo, create_bare_remote, push_student_commit};

/// A submissions directory of student clones, each backed by a bare remote
///
/// Layout under the temp dir:
/// - `remotes/<name>.git`: the "GitHub" side
/// - `students/<name>`: the student's own working copy
/// - `submissions/<name>`: the instructor's clone
pub struct SubmissionsFixture {
    pub temp_dir: TempDir,
}

impl SubmissionsFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        std::fs::create_dir(temp_dir.path().join("submissions"))?;
        Ok(Self { temp_dir })
    }

    /// The directory handed to pull and push
    pub fn submissions(&self) -> PathBuf {
        self.temp_dir.path().join("submissions")
    }

    pub fn remote(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("remotes").join(format!("{name}.git"))
    }

    pub fn student(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("students").join(name)
    }

    pub fn repo(&self, name: &str) -> PathBuf {
        self.submissions().join(name)
    }

    /// Creates a remote for `name` without cloning it into submissions
    pub fn add_remote(&self, name: &str) -> Result<PathBuf> {
        let remote = self.remote(name);
        create_bare_remote(&remote, &self.student(name))?;
        Ok(remote)
    }

    /// Creates a remote for `name` and clones it into submissions
    pub fn add_student(&self, name: &str) -> Result<PathBuf> {
        let remote = self.add_remote(name)?;
        let repo = self.repo(name);
        clone_repo(&remote, &repo)?;
        Ok(repo)
    }

    /// Writes `grade-<name>.md` next to the repositories
    pub fn add_feedback(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.submissions().join(format!("grade-{name}.md"));
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Pushes a new commit to the remote from the student's side
    pub fn student_pushes(&self, name: &str, file_name: &str) -> Result<()> {
        push_student_commit(&self.student(name), file_name, "new work\n")
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
