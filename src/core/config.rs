//! Configuration constants and settings

pub const APP_NAME: &str = "classroom-repos";

// Timeout constants
pub const GIT_OPERATION_TIMEOUT_SECS: u64 = 180; // 3 minutes per git invocation

// Feedback file naming
pub const FEEDBACK_FILE_PREFIX: &str = "grade-";
pub const FEEDBACK_FILE_SUFFIX: &str = ".md";
pub const FEEDBACK_FILE_PATTERN: &str = r"^grade-(?P<name>.+)\.md$";

// Clone destination suffix appended to the assignment slug
pub const SUBMISSIONS_DIR_SUFFIX: &str = "-submissions";

// Per-item result texts
pub const ALREADY_EXISTS_MESSAGE: &str = "already exists, skipping";
pub const NOT_A_REPOSITORY_MESSAGE: &str = "not a repository";
pub const PULL_FAILED_MESSAGE: &str = "failed to pull";
pub const NEW_COMMITS_NOTE: &str = "new commits";
pub const NOTHING_TO_COMMIT_NOTE: &str = "nothing to commit, clean";
pub const NO_FEEDBACK_FILE_MESSAGE: &str = "no feedback file paired";

// UI Constants
pub const NO_REPOS_MESSAGE: &str = "No repositories found.";
pub const NOTHING_TO_CLONE_MESSAGE: &str =
    "No student submissions were found for this assignment, or you do not have permission to access them.";
pub const PROGRESS_CHARS: &str = "##-";
pub const PROGRESS_TEMPLATE: &str = "{prefix:.bold} {wide_msg}\n  [{bar:40}] {pos}/{len}";
pub const SEPARATOR_WIDTH: usize = 70;

pub const ERROR_MESSAGE_MAX_LENGTH: usize = 80;

pub const LAYOUT_HELP: &str = "The directory should have been created using the 'clone' command and should include:\n\
- Subdirectories, each named after a student's repository (e.g., assignment-01-JohnDoeStudent).\n\
- Markdown files, each named with the pattern 'grade-<repository-name>.md' (e.g., grade-assignment-01-JohnDoeStudent.md).";
