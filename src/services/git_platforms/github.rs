use super::{GitHubSource, PlatformConfig, ReadmeFile, ReadmeSink};
use crate::models::{CommitEvent, IssueComment, IssueSummary, RepositorySummary, UserData, ViewerInfo};
use crate::utils::validators::validate_login;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use url::Url;

const COMMIT_HISTORY_LIMIT: i64 = 100;
const BOT_NAME: &str = "wakatime-generator-bot";
const BOT_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";

const VIEWER_QUERY: &str = r#"
    query {
        viewer {
            login
            id
        }
    }
"#;

const USER_DATA_QUERY: &str = r#"
    query($login: String!, $from: DateTime!, $sinceOneMonth: DateTime!) {
        user(login: $login) {
            name
            email
            isHireable
            contributionsCollection(from: $from) {
                contributionCalendar {
                    totalContributions
                }
            }
            repositories(last: 100, isFork: false) {
                totalCount
                totalDiskUsage
                nodes {
                    name
                    owner {
                        login
                    }
                    diskUsage
                    isPrivate
                    defaultBranchRef {
                        name
                    }
                    primaryLanguage {
                        name
                    }
                }
            }
            issues(last: 5, filterBy: {since: $sinceOneMonth}, orderBy: {direction: ASC, field: UPDATED_AT}) {
                nodes {
                    title
                    url
                    updatedAt
                    state
                }
            }
            issueComments(last: 10, orderBy: {direction: ASC, field: UPDATED_AT}) {
                nodes {
                    url
                    issue {
                        title
                    }
                }
            }
        }
    }
"#;

const COMMIT_HISTORY_QUERY: &str = r#"
    query($owner: String!, $name: String!, $last: Int!, $id: ID!, $branch: String!, $since: GitTimestamp!) {
        repository(owner: $owner, name: $name) {
            ref(qualifiedName: $branch) {
                target {
                    ... on Commit {
                        history(first: $last, author: {id: $id}, since: $since) {
                            nodes {
                                committedDate
                            }
                        }
                    }
                }
            }
        }
    }
"#;

pub struct GitHubClient {
    http: Client,
    config: PlatformConfig,
    token: String,
}

impl GitHubClient {
    pub fn new(http: Client, config: PlatformConfig, token: String) -> Self {
        Self {
            http,
            config,
            token,
        }
    }

    /// POST a GraphQL query and unwrap the `data` member
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.config.graphql_url())
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!(
                "GitHub API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let body: GraphQlResponse<T> = response.json().await?;
        body.into_data()
    }

    fn repo_url(&self, login: &str, rest: &str) -> Result<String> {
        validate_login(login)?;
        Ok(format!(
            "{}/repos/{}/{}{}",
            self.config.api_base_url, login, login, rest
        ))
    }
}

#[async_trait]
impl GitHubSource for GitHubClient {
    async fn fetch_viewer(&self) -> Result<ViewerInfo> {
        let data: ViewerData = self.graphql(VIEWER_QUERY, json!({})).await?;
        log::info!("👤 Authenticated as {}", data.viewer.login);
        Ok(data.viewer)
    }

    async fn fetch_user_data(
        &self,
        login: &str,
        contributions_from: DateTime<Utc>,
        issues_since: DateTime<Utc>,
    ) -> Result<UserData> {
        let variables = json!({
            "login": login,
            "from": contributions_from.to_rfc3339(),
            "sinceOneMonth": issues_since.to_rfc3339(),
        });

        let data: UserDataResponse = self.graphql(USER_DATA_QUERY, variables).await?;
        let user = data
            .user
            .ok_or_else(|| anyhow!("User {} not found", login))?
            .into_user_data();

        log::info!(
            "📦 Fetched {} repositories, {} recent issues for {}",
            user.repositories.len(),
            user.issues.len(),
            login
        );

        Ok(user)
    }

    async fn fetch_commit_history(
        &self,
        repository: &RepositorySummary,
        author_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitEvent>> {
        let Some(branch) = repository.default_branch.as_deref() else {
            log::debug!("Skipping {}: no default branch", repository.name);
            return Ok(Vec::new());
        };

        let variables = json!({
            "owner": repository.owner_login,
            "name": repository.name,
            "last": COMMIT_HISTORY_LIMIT,
            "id": author_id,
            "branch": branch,
            "since": since.to_rfc3339(),
        });

        let data: CommitHistoryResponse = self.graphql(COMMIT_HISTORY_QUERY, variables).await?;
        let timestamps = data.committed_dates()?;

        log::info!(
            "📥 Fetched {} commits from {}/{}",
            timestamps.len(),
            repository.owner_login,
            repository.name
        );

        Ok(timestamps
            .into_iter()
            .map(|ts| CommitEvent::new(repository.name.clone(), ts))
            .collect())
    }
}

#[async_trait]
impl ReadmeSink for GitHubClient {
    async fn fetch_readme(&self, login: &str) -> Result<ReadmeFile> {
        let response = self
            .http
            .get(self.repo_url(login, "/readme")?)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!(
                "Failed to fetch README for {}: status {}: {}",
                login,
                status,
                error_text
            ));
        }

        let contents: GitHubContents = response.json().await?;
        contents.into_readme_file()
    }

    async fn update_readme(
        &self,
        login: &str,
        readme: &ReadmeFile,
        content: &str,
        message: &str,
    ) -> Result<()> {
        let path = readme
            .path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let signature = json!({
            "name": BOT_NAME,
            "email": BOT_EMAIL,
            "date": Utc::now().to_rfc3339(),
        });
        let mut body = json!({
            "message": message,
            "content": general_purpose::STANDARD.encode(content),
            "sha": readme.sha,
            "author": signature,
            "committer": signature,
        });
        if let (Some(branch), Some(fields)) = (&readme.branch, body.as_object_mut()) {
            fields.insert("branch".to_string(), json!(branch));
        }

        let response = self
            .http
            .put(self.repo_url(login, &format!("/contents/{}", path))?)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!(
                "Failed to update {}: status {}: {}",
                readme.path,
                status,
                error_text
            ));
        }

        log::info!("✅ Committed {} to {}/{}", readme.path, login, login);
        Ok(())
    }
}

// GitHub API response types

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    fn into_data(self) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(anyhow!("GitHub GraphQL errors: {}", messages.join("; ")));
        }
        self.data.ok_or_else(|| anyhow!("No data in GitHub response"))
    }
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: ViewerInfo,
}

#[derive(Debug, Deserialize)]
struct UserDataResponse {
    user: Option<GitHubUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitHubUser {
    name: Option<String>,
    email: Option<String>,
    is_hireable: bool,
    contributions_collection: GitHubContributionsCollection,
    repositories: GitHubRepositoryConnection,
    issues: Nodes<GitHubIssue>,
    issue_comments: Nodes<GitHubIssueComment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitHubContributionsCollection {
    contribution_calendar: GitHubContributionCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitHubContributionCalendar {
    total_contributions: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitHubRepositoryConnection {
    total_count: u64,
    total_disk_usage: u64,
    nodes: Vec<Option<GitHubRepository>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitHubRepository {
    name: String,
    owner: GitHubOwner,
    disk_usage: Option<u64>,
    is_private: bool,
    default_branch_ref: Option<NamedRef>,
    primary_language: Option<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct GitHubOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitHubIssue {
    title: String,
    url: String,
    updated_at: DateTime<Utc>,
    state: String,
}

#[derive(Debug, Deserialize)]
struct GitHubIssueComment {
    url: String,
    issue: GitHubCommentIssue,
}

#[derive(Debug, Deserialize)]
struct GitHubCommentIssue {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Nodes<T> {
    nodes: Vec<Option<T>>,
}

impl<T> Nodes<T> {
    fn into_items(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten()
    }
}

impl GitHubUser {
    fn into_user_data(self) -> UserData {
        let repositories = self
            .repositories
            .nodes
            .into_iter()
            .flatten()
            .map(|repo| RepositorySummary {
                name: repo.name,
                owner_login: repo.owner.login,
                primary_language: repo.primary_language.map(|l| l.name),
                is_private: repo.is_private,
                disk_usage_kb: repo.disk_usage.unwrap_or(0),
                default_branch: repo.default_branch_ref.map(|r| r.name),
            })
            .collect();

        let issues = self
            .issues
            .into_items()
            .map(|issue| IssueSummary {
                title: issue.title,
                url: issue.url,
                updated_at: issue.updated_at,
                state: issue.state,
            })
            .collect();

        let issue_comments = self
            .issue_comments
            .into_items()
            .map(|comment| IssueComment {
                url: comment.url,
                issue_title: comment.issue.title,
            })
            .collect();

        UserData {
            name: self.name,
            email: self.email.filter(|e| !e.is_empty()),
            is_hireable: self.is_hireable,
            total_contributions: self
                .contributions_collection
                .contribution_calendar
                .total_contributions,
            total_repository_count: self.repositories.total_count,
            total_disk_usage_kb: self.repositories.total_disk_usage,
            repositories,
            issues,
            issue_comments,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommitHistoryResponse {
    repository: Option<CommitHistoryRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitHistoryRepository {
    #[serde(rename = "ref")]
    git_ref: Option<CommitHistoryRef>,
}

#[derive(Debug, Deserialize)]
struct CommitHistoryRef {
    target: Option<CommitHistoryTarget>,
}

/// `history` is absent when the ref points at something other than a commit.
#[derive(Debug, Deserialize)]
struct CommitHistoryTarget {
    history: Option<Nodes<CommitNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitNode {
    committed_date: DateTime<Utc>,
}

impl CommitHistoryResponse {
    fn committed_dates(self) -> Result<Vec<DateTime<Utc>>> {
        let repository = self
            .repository
            .ok_or_else(|| anyhow!("Repository not found"))?;

        Ok(repository
            .git_ref
            .and_then(|r| r.target)
            .and_then(|t| t.history)
            .map(|h| h.into_items().map(|n| n.committed_date).collect())
            .unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct GitHubContents {
    path: String,
    sha: String,
    content: String,
    url: String,
}

impl GitHubContents {
    fn into_readme_file(self) -> Result<ReadmeFile> {
        // GitHub wraps the base64 payload at 60 columns.
        let packed: String = self.content.split_whitespace().collect();
        let bytes = general_purpose::STANDARD
            .decode(packed)
            .map_err(|e| anyhow!("Invalid base64 README content: {}", e))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| anyhow!("README is not valid UTF-8: {}", e))?;

        let branch = Url::parse(&self.url).ok().and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "ref")
                .map(|(_, value)| value.into_owned())
        });

        Ok(ReadmeFile {
            path: self.path,
            sha: self.sha,
            content,
            branch,
        })
    }
}
