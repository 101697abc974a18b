use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One commit authored by the viewer on a repository's default branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEvent {
    pub repository_name: String,
    pub timestamp: DateTime<Utc>,
}

impl CommitEvent {
    pub fn new(repository_name: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            repository_name: repository_name.into(),
            timestamp,
        }
    }
}
