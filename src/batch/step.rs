//! Externally executed steps and the executor that runs them

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

use crate::git::{run_git, GitCommand, GitOutput};
use crate::utils::{copy_file, create_file_if_absent};

/// One suspension point of a protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Git(GitCommand),
    /// Copy a file, overwriting the destination
    CopyFile { from: PathBuf, to: PathBuf },
    /// Create a file with the given contents unless it already exists
    CreateFile { path: PathBuf, contents: String },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Git(command) => write!(f, "{command}"),
            Step::CopyFile { to, .. } => write!(f, "copy {}", file_label(to)),
            Step::CreateFile { path, .. } => write!(f, "create {}", file_label(path)),
        }
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// What a step produced; filesystem steps report errors through `stderr`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl StepOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn ok_with_output(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message.into(),
        }
    }

    /// First non-empty line of stderr (or stdout), for failure annotations
    pub fn first_error_line(&self) -> Option<&str> {
        self.stderr
            .lines()
            .chain(self.stdout.lines())
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

impl From<GitOutput> for StepOutcome {
    fn from(output: GitOutput) -> Self {
        Self {
            success: output.success,
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Runs steps on behalf of the batch coordinator
#[async_trait]
pub trait StepExecutor: Send + Sync {
    async fn execute(&self, step: Step) -> StepOutcome;
}

/// Executes steps against the real git binary and filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

#[async_trait]
impl StepExecutor for SystemExecutor {
    async fn execute(&self, step: Step) -> StepOutcome {
        match step {
            Step::Git(command) => match run_git(&command.dir, &command.args).await {
                Ok(output) => output.into(),
                Err(e) => StepOutcome::failed(e.to_string()),
            },
            Step::CopyFile { from, to } => match copy_file(&from, &to).await {
                Ok(()) => StepOutcome::ok(),
                Err(e) => StepOutcome::failed(e.to_string()),
            },
            Step::CreateFile { path, contents } => {
                match create_file_if_absent(&path, &contents).await {
                    Ok(()) => StepOutcome::ok(),
                    Err(e) => StepOutcome::failed(e.to_string()),
                }
            }
        }
    }
}
