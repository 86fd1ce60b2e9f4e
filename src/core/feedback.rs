//! Feedback file naming and template rendering

use super::config::{FEEDBACK_FILE_PREFIX, FEEDBACK_FILE_SUFFIX};

/// Staging file name for a repository: `grade-<repository-name>.md`
pub fn feedback_file_name(repository_name: &str) -> String {
    format!("{FEEDBACK_FILE_PREFIX}{repository_name}{FEEDBACK_FILE_SUFFIX}")
}

/// Commit a feedback file was written against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStamp {
    pub short_hash: String,
    pub date: String,
}

impl CommitStamp {
    /// Returns `None` when git could not report a hash (e.g. an empty repository)
    pub fn new(short_hash: &str, date: &str) -> Option<Self> {
        let short_hash = single_line(short_hash);
        if short_hash.is_empty() {
            return None;
        }
        Some(Self {
            short_hash,
            date: single_line(date),
        })
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], "")
}

/// Title and grade label strings taken from the settings file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackTemplate {
    pub title: String,
    pub grade: String,
}

impl FeedbackTemplate {
    pub fn new(title: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            grade: grade.into(),
        }
    }

    /// Renders the initial contents of a feedback file
    pub fn render(&self, stamp: Option<&CommitStamp>) -> String {
        let mut text = format!("# {}\n", self.title);
        if let Some(stamp) = stamp {
            text.push_str(&format!("> Commit: {} | {}\n", stamp.short_hash, stamp.date));
        }
        text.push_str(&format!("\n- ...\n- **{}** \n\n", self.grade));
        text
    }
}
