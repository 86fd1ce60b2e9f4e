//! Git invocations used by the batch protocols
//!
//! Every command carries its own working directory; nothing relies on the
//! process-wide current directory.

use std::fmt;
use std::path::{Path, PathBuf};

// Git command arguments
const SHOW_TOPLEVEL_ARGS: &[&str] = &["rev-parse", "--show-toplevel"];
const SHORT_HEAD_ARGS: &[&str] = &["rev-parse", "--short", "HEAD"];
const COMMIT_DATE_ARGS: &[&str] = &["show", "-s", "--format=%ci"];
const RESET_ARGS: &[&str] = &["reset", "-q"];
const STASH_PUSH_ARGS: &[&str] = &["stash", "-a", "-q"];
const STASH_POP_ARGS: &[&str] = &["stash", "pop"];
const REV_LIST_COUNT_ARGS: &[&str] = &["rev-list", "--all", "--count"];
const PULL_REBASE_ARGS: &[&str] = &["pull", "-q", "--rebase"];
const STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain"];
const PUSH_ARGS: &[&str] = &["push", "-q"];

/// A git invocation bound to the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    pub dir: PathBuf,
    pub args: Vec<String>,
}

impl GitCommand {
    fn fixed(dir: &Path, args: &[&str]) -> Self {
        Self {
            dir: dir.to_path_buf(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// `git clone -q <url> <dest>`, run from the directory receiving the clone
    pub fn clone_into(parent: &Path, url: &str, dest: &Path) -> Self {
        Self {
            dir: parent.to_path_buf(),
            args: vec![
                "clone".to_string(),
                "-q".to_string(),
                url.to_string(),
                dest.to_string_lossy().into_owned(),
            ],
        }
    }

    pub fn short_head(dir: &Path) -> Self {
        Self::fixed(dir, SHORT_HEAD_ARGS)
    }

    pub fn commit_date(dir: &Path) -> Self {
        Self::fixed(dir, COMMIT_DATE_ARGS)
    }

    /// `git rev-parse --show-toplevel`, used to qualify repository roots
    pub fn show_toplevel(dir: &Path) -> Self {
        Self::fixed(dir, SHOW_TOPLEVEL_ARGS)
    }

    pub fn reset(dir: &Path) -> Self {
        Self::fixed(dir, RESET_ARGS)
    }

    /// Stashes everything, untracked and ignored files included
    pub fn stash_push(dir: &Path) -> Self {
        Self::fixed(dir, STASH_PUSH_ARGS)
    }

    pub fn stash_pop(dir: &Path) -> Self {
        Self::fixed(dir, STASH_POP_ARGS)
    }

    pub fn commit_count(dir: &Path) -> Self {
        Self::fixed(dir, REV_LIST_COUNT_ARGS)
    }

    pub fn pull_rebase(dir: &Path) -> Self {
        Self::fixed(dir, PULL_REBASE_ARGS)
    }

    pub fn add(dir: &Path, file: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            args: vec!["add".to_string(), file.to_string()],
        }
    }

    pub fn status_porcelain(dir: &Path) -> Self {
        Self::fixed(dir, STATUS_PORCELAIN_ARGS)
    }

    pub fn commit(dir: &Path, message: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            args: vec![
                "commit".to_string(),
                "-q".to_string(),
                "-m".to_string(),
                message.to_string(),
            ],
        }
    }

    pub fn push(dir: &Path) -> Self {
        Self::fixed(dir, PUSH_ARGS)
    }

    /// True when the arguments start with the given words
    pub fn starts_with(&self, words: &[&str]) -> bool {
        self.args.len() >= words.len() && self.args.iter().zip(words).all(|(a, w)| a == w)
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_vectors_are_literal() {
        let dir = Path::new("/work/alice");
        assert_eq!(GitCommand::reset(dir).to_string(), "git reset -q");
        assert_eq!(GitCommand::stash_push(dir).to_string(), "git stash -a -q");
        assert_eq!(GitCommand::stash_pop(dir).to_string(), "git stash pop");
        assert_eq!(GitCommand::commit_count(dir).to_string(), "git rev-list --all --count");
        assert_eq!(GitCommand::pull_rebase(dir).to_string(), "git pull -q --rebase");
        assert_eq!(GitCommand::push(dir).to_string(), "git push -q");
        assert_eq!(GitCommand::commit_date(dir).to_string(), "git show -s --format=%ci");
        assert_eq!(GitCommand::short_head(dir).to_string(), "git rev-parse --short HEAD");
        assert_eq!(
            GitCommand::show_toplevel(dir).to_string(),
            "git rev-parse --show-toplevel"
        );
    }

    #[test]
    fn test_commit_message_stays_a_single_argument() {
        let cmd = GitCommand::commit(Path::new("/work/bob"), "graded: see GRADING.md");
        assert_eq!(cmd.args, vec!["commit", "-q", "-m", "graded: see GRADING.md"]);
        assert!(cmd.starts_with(&["commit"]));
        assert!(!cmd.starts_with(&["commit", "-m"]));
    }

    #[test]
    fn test_clone_runs_from_parent_directory() {
        let cmd = GitCommand::clone_into(
            Path::new("/subs"),
            "https://github.com/org/alice",
            Path::new("/subs/alice"),
        );
        assert_eq!(cmd.dir, PathBuf::from("/subs"));
        assert_eq!(cmd.args[..3], ["clone", "-q", "https://github.com/org/alice"]);
    }
}
