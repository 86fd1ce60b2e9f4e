//! Minimal async client for the GitHub Classroom REST API

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::models::{AcceptedAssignment, Assignment, Classroom};

pub const GITHUB_API_URL: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";
const PER_PAGE: usize = 100;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("classroom-repos/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClassroomError {
    #[error("{context} => HTTP 401: bad credentials.\nVisit https://docs.github.com/en/authentication/keeping-your-account-and-data-secure/managing-your-personal-access-tokens to generate a new token,\nthen run 'classroom token set' to update it.")]
    BadCredentials { context: &'static str },
    #[error("{context} => HTTP {status}: {message}")]
    Status {
        context: &'static str,
        status: StatusCode,
        message: String,
    },
    #[error("{context}: {source}")]
    Request {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

pub struct ClassroomClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ClassroomClient {
    pub fn new(token: impl Into<String>) -> Result<Self, ClassroomError> {
        Self::with_base_url(GITHUB_API_URL, token)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ClassroomError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|source| ClassroomError::Request {
                context: "Failed to build the HTTP client",
                source,
            })?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Classrooms visible to the token, archived ones included
    pub async fn classrooms(&self) -> Result<Vec<Classroom>, ClassroomError> {
        self.get_all("classrooms", "Failed to retrieve the classrooms list")
            .await
    }

    pub async fn assignments(&self, classroom_id: u64) -> Result<Vec<Assignment>, ClassroomError> {
        self.get_all(
            &format!("classrooms/{classroom_id}/assignments"),
            "Failed to retrieve the assignments list",
        )
        .await
    }

    pub async fn assignment(&self, assignment_id: u64) -> Result<Assignment, ClassroomError> {
        self.get(
            &format!("assignments/{assignment_id}"),
            &[],
            "Failed to retrieve the assignment",
        )
        .await
    }

    pub async fn accepted_assignments(
        &self,
        assignment_id: u64,
    ) -> Result<Vec<AcceptedAssignment>, ClassroomError> {
        self.get_all(
            &format!("assignments/{assignment_id}/accepted_assignments"),
            "Failed to retrieve the accepted assignments list",
        )
        .await
    }

    /// Follows `page` until an empty or short page comes back
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
    ) -> Result<Vec<T>, ClassroomError> {
        let mut items = Vec::new();
        let per_page = PER_PAGE.to_string();
        for page in 1.. {
            let page_number = page.to_string();
            let query = [("page", page_number.as_str()), ("per_page", per_page.as_str())];
            let batch: Vec<T> = self.get(path, &query, context).await?;
            let fetched = batch.len();
            items.extend(batch);
            if fetched < PER_PAGE {
                break;
            }
        }
        Ok(items)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &'static str,
    ) -> Result<T, ClassroomError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, ?query, "GET");

        let request_error = |source| ClassroomError::Request { context, source };
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClassroomError::BadCredentials { context });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClassroomError::Status {
                context,
                status,
                message: error_message(&message),
            });
        }
        response.json().await.map_err(request_error)
    }
}

/// Extracts `message` from a GitHub error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
