pub mod github;

pub use github::GitHubClient;

use crate::models::{CommitEvent, RepositorySummary, UserData, ViewerInfo};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Where the GitHub API lives
#[derive(Clone, Debug)]
pub struct PlatformConfig {
    pub api_base_url: String,
}

impl PlatformConfig {
    /// GitHub.com or a GitHub Enterprise instance
    pub fn custom(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.api_base_url)
    }
}

/// Read side of GitHub: profile, repositories, issues and commit history.
#[async_trait]
pub trait GitHubSource: Send + Sync {
    /// Login and node id of the token's owner
    async fn fetch_viewer(&self) -> Result<ViewerInfo>;

    /// Profile, contribution total, repositories, recent issues and comments
    async fn fetch_user_data(
        &self,
        login: &str,
        contributions_from: DateTime<Utc>,
        issues_since: DateTime<Utc>,
    ) -> Result<UserData>;

    /// Commits by `author_id` on the repository's default branch since `since`
    async fn fetch_commit_history(
        &self,
        repository: &RepositorySummary,
        author_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitEvent>>;
}

/// The profile README as stored on GitHub.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadmeFile {
    pub path: String,
    pub sha: String,
    pub content: String,
    /// Branch the README was read from, when GitHub says so.
    pub branch: Option<String>,
}

/// Write side: read the README and commit a new version over it.
#[async_trait]
pub trait ReadmeSink: Send + Sync {
    async fn fetch_readme(&self, login: &str) -> Result<ReadmeFile>;

    async fn update_readme(
        &self,
        login: &str,
        readme: &ReadmeFile,
        content: &str,
        message: &str,
    ) -> Result<()>;
}
