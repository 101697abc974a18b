use super::issue::{IssueComment, IssueSummary};
use super::repository::RepositorySummary;
use serde::{Deserialize, Serialize};

/// The authenticated user behind the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerInfo {
    pub login: String,
    /// Opaque GraphQL node id, used to filter commit history by author.
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_hireable: bool,
    /// Contribution calendar total since Jan 1 of the current year.
    pub total_contributions: u64,
    /// May exceed `repositories.len()`, which is capped at 100.
    pub total_repository_count: u64,
    pub total_disk_usage_kb: u64,
    pub repositories: Vec<RepositorySummary>,
    /// Ascending by update time.
    pub issues: Vec<IssueSummary>,
    pub issue_comments: Vec<IssueComment>,
}
