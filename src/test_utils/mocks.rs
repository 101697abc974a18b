//! In-memory implementations of the source and sink traits.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::models::{CommitEvent, RepositorySummary, UserData, ViewerInfo, WakaTimeStats};
use crate::services::git_platforms::{GitHubSource, ReadmeFile, ReadmeSink};
use crate::services::wakatime::CodingTimeSource;

// ============================================================================
// GitHub source
// ============================================================================

pub struct InMemoryGitHub {
    viewer: ViewerInfo,
    user_data: UserData,
    commits: HashMap<String, Vec<DateTime<Utc>>>,
    failing_repositories: HashSet<String>,
    history_requests: Mutex<Vec<(String, String, DateTime<Utc>)>>,
}

impl InMemoryGitHub {
    pub fn new(viewer: ViewerInfo, user_data: UserData) -> Self {
        Self {
            viewer,
            user_data,
            commits: HashMap::new(),
            failing_repositories: HashSet::new(),
            history_requests: Mutex::new(Vec::new()),
        }
    }

    /// Give `repository` `count` commits, all at `timestamp`
    pub fn with_commits(mut self, repository: &str, count: usize, timestamp: DateTime<Utc>) -> Self {
        self.commits
            .entry(repository.to_string())
            .or_default()
            .extend(std::iter::repeat(timestamp).take(count));
        self
    }

    pub fn failing_on(mut self, repository: &str) -> Self {
        self.failing_repositories.insert(repository.to_string());
        self
    }

    /// (repository, author id, since) for every history request, in call order
    pub fn history_requests(&self) -> Vec<(String, String, DateTime<Utc>)> {
        self.history_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHubSource for InMemoryGitHub {
    async fn fetch_viewer(&self) -> Result<ViewerInfo> {
        Ok(self.viewer.clone())
    }

    async fn fetch_user_data(
        &self,
        login: &str,
        _contributions_from: DateTime<Utc>,
        _issues_since: DateTime<Utc>,
    ) -> Result<UserData> {
        if login != self.viewer.login {
            return Err(anyhow!("User {} not found", login));
        }
        Ok(self.user_data.clone())
    }

    async fn fetch_commit_history(
        &self,
        repository: &RepositorySummary,
        author_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitEvent>> {
        self.history_requests.lock().unwrap().push((
            repository.name.clone(),
            author_id.to_string(),
            since,
        ));

        if self.failing_repositories.contains(&repository.name) {
            return Err(anyhow!("GitHub API request failed with status 502"));
        }

        Ok(self
            .commits
            .get(&repository.name)
            .map(|timestamps| {
                timestamps
                    .iter()
                    .map(|ts| CommitEvent::new(repository.name.clone(), *ts))
                    .collect()
            })
            .unwrap_or_default())
    }
}

// ============================================================================
// README sink
// ============================================================================

pub struct InMemoryReadme {
    readme: Mutex<ReadmeFile>,
    commits: Mutex<Vec<(String, String)>>,
}

impl InMemoryReadme {
    pub fn new(content: &str) -> Self {
        Self {
            readme: Mutex::new(ReadmeFile {
                path: "README.md".to_string(),
                sha: "sha-0".to_string(),
                content: content.to_string(),
                branch: None,
            }),
            commits: Mutex::new(Vec::new()),
        }
    }

    pub fn content(&self) -> String {
        self.readme.lock().unwrap().content.clone()
    }

    /// (message, content) of every commit made
    pub fn commits(&self) -> Vec<(String, String)> {
        self.commits.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReadmeSink for InMemoryReadme {
    async fn fetch_readme(&self, _login: &str) -> Result<ReadmeFile> {
        Ok(self.readme.lock().unwrap().clone())
    }

    async fn update_readme(
        &self,
        _login: &str,
        readme: &ReadmeFile,
        content: &str,
        message: &str,
    ) -> Result<()> {
        let mut current = self.readme.lock().unwrap();
        if current.sha != readme.sha {
            return Err(anyhow!("sha mismatch: README was changed concurrently"));
        }
        let next = self.commits.lock().unwrap().len() + 1;
        current.content = content.to_string();
        current.sha = format!("sha-{}", next);
        self.commits
            .lock()
            .unwrap()
            .push((message.to_string(), content.to_string()));
        Ok(())
    }
}

// ============================================================================
// WakaTime source
// ============================================================================

/// Returns the configured stats, or fails when none were given
pub struct InMemoryWakaTime {
    stats: Option<WakaTimeStats>,
}

impl InMemoryWakaTime {
    pub fn returning(stats: WakaTimeStats) -> Self {
        Self { stats: Some(stats) }
    }

    pub fn failing() -> Self {
        Self { stats: None }
    }
}

#[async_trait]
impl CodingTimeSource for InMemoryWakaTime {
    async fn fetch_weekly_stats(&self) -> Result<WakaTimeStats> {
        self.stats
            .clone()
            .ok_or_else(|| anyhow!("Failed to decode WakaTime stats: expected value"))
    }
}
