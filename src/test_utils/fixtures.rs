use chrono::{DateTime, Utc};

use crate::models::wakatime::ProjectStat;
use crate::models::{IssueSummary, RepositorySummary, UserData, ViewerInfo, WakaTimeStats};

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("fixture timestamps are RFC 3339")
        .with_timezone(&Utc)
}

pub fn test_viewer() -> ViewerInfo {
    ViewerInfo {
        login: "octocat".to_string(),
        id: "MDQ6VXNlcjE=".to_string(),
    }
}

pub fn test_repository(name: &str, language: Option<&str>, is_private: bool) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        owner_login: "octocat".to_string(),
        primary_language: language.map(String::from),
        is_private,
        disk_usage_kb: 512,
        default_branch: Some("main".to_string()),
    }
}

pub fn test_issue(title: &str, updated_at: &str) -> IssueSummary {
    IssueSummary {
        title: title.to_string(),
        url: format!("https://github.com/octocat/hello/issues/{}", title),
        updated_at: utc(updated_at),
        state: "OPEN".to_string(),
    }
}

pub fn test_user_data(repositories: Vec<RepositorySummary>) -> UserData {
    UserData {
        name: Some("The Octocat".to_string()),
        email: None,
        is_hireable: false,
        total_contributions: 128,
        total_repository_count: repositories.len() as u64,
        total_disk_usage_kb: repositories.iter().map(|r| r.disk_usage_kb).sum(),
        repositories,
        issues: vec![
            test_issue("first", "2024-03-01T10:00:00Z"),
            test_issue("second", "2024-03-02T10:00:00Z"),
        ],
        issue_comments: Vec::new(),
    }
}

pub fn test_wakatime_stats() -> WakaTimeStats {
    WakaTimeStats {
        range: "last_7_days".to_string(),
        human_readable_total: "5 hrs".to_string(),
        total_seconds: 18000.0,
        projects: vec![
            ProjectStat {
                name: "readme-stats".to_string(),
                text: "4 hrs".to_string(),
                percent: 80.0,
                total_seconds: 14400.0,
            },
            ProjectStat {
                name: "Unknown Project".to_string(),
                text: "1 hr".to_string(),
                percent: 20.0,
                total_seconds: 3600.0,
            },
        ],
        ..Default::default()
    }
}

pub const TEST_README: &str =
    "# Hi there\n\n<!--START_SECTION:waka-->\nstale\n<!--END_SECTION:waka-->\n\nThanks for visiting!\n";
