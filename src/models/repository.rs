use serde::{Deserialize, Serialize};

pub const OTHER_LANGUAGE: &str = "Other";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub owner_login: String,
    pub primary_language: Option<String>,
    pub is_private: bool,
    pub disk_usage_kb: u64,
    /// `None` for repositories without any commits yet.
    pub default_branch: Option<String>,
}

impl RepositorySummary {
    /// Language the repository is counted under; repositories GitHub could
    /// not classify fall into "Other".
    pub fn display_language(&self) -> &str {
        match self.primary_language.as_deref() {
            Some(lang) if !lang.is_empty() => lang,
            _ => OTHER_LANGUAGE,
        }
    }
}
