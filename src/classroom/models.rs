//! GitHub Classroom REST payloads

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Classroom {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Assignment {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub accepted: u32,
    #[serde(default)]
    pub submitted: u32,
    #[serde(default)]
    pub passing: u32,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub invite_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Student {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentRepository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// A student's (or team's) repository for an assignment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AcceptedAssignment {
    pub id: u64,
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub passing: bool,
    #[serde(default)]
    pub commit_count: u32,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub students: Vec<Student>,
    pub repository: StudentRepository,
}

impl AcceptedAssignment {
    /// Comma-separated student logins
    pub fn student_logins(&self) -> String {
        self.students
            .iter()
            .map(|student| student.login.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
