//! Basic git operations and command execution

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use super::commands::GitCommand;
use crate::core::config::GIT_OPERATION_TIMEOUT_SECS;

/// Captured result of a single git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a git command in the specified directory with a timeout
///
/// The adapter never retries and never interprets the exit status; callers
/// decide what a non-zero exit means for them.
pub async fn run_git<S: AsRef<str>>(path: &Path, args: &[S]) -> Result<GitOutput> {
    run_git_with_timeout(path, args, Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS)).await
}

/// Like [`run_git`], with an explicit limit
///
/// On timeout git is killed together with every process it started (hooks,
/// aliases, the fetch and rebase helpers behind `pull`) before this returns,
/// so nothing keeps working on the repository once the step has failed.
pub async fn run_git_with_timeout<S: AsRef<str>>(
    path: &Path,
    args: &[S],
    limit: Duration,
) -> Result<GitOutput> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    debug!(cwd = %path.display(), "git {}", args.join(" "));

    let mut command = Command::new("git");
    command
        .args(&args)
        .current_dir(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    command.process_group(0);

    let child = command.spawn()?;
    let pid = child.id();

    match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => {
            let output = GitOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            };
            debug!(success = output.success, "git {} finished", args.join(" "));
            Ok(output)
        }
        Ok(Err(e)) => Err(e.into()),
        Err(_) => {
            // The dropped future already killed git itself; its children
            // live on in the process group.
            if let Some(pid) = pid {
                kill_process_group(pid);
            }
            warn!(cwd = %path.display(), "git {} timed out", args.join(" "));
            Err(anyhow::anyhow!(
                "Git operation timed out after {} seconds",
                limit.as_secs()
            ))
        }
    }
}

#[cfg(unix)]
fn kill_process_group(pid: u32) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Ok(pgid) = i32::try_from(pid) else {
        return;
    };
    if let Err(e) = kill(Pid::from_raw(-pgid), Signal::SIGKILL) {
        debug!("failed to kill process group {pgid}: {e}");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

/// Asks git for the top-level directory of the working tree containing `path`
pub async fn show_toplevel(path: &Path) -> Option<PathBuf> {
    let command = GitCommand::show_toplevel(path);
    match run_git(&command.dir, &command.args).await {
        Ok(output) if output.success && !output.stdout.is_empty() => {
            Some(PathBuf::from(output.stdout))
        }
        _ => None,
    }
}

/// Checks that `path` is itself the root of a git working tree
///
/// A subdirectory of some enclosing repository reports that repository's
/// root and is therefore rejected.
pub async fn is_repository_root(path: &Path) -> bool {
    let Some(toplevel) = show_toplevel(path).await else {
        return false;
    };
    let expected = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let reported = std::fs::canonicalize(&toplevel).unwrap_or(toplevel);
    expected == reported
}
