use serde::{Deserialize, Serialize};

pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Trailing seven day summary from WakaTime's stats endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WakaTimeStats {
    pub range: String,
    pub human_readable_total: String,
    pub total_seconds: f64,
    pub projects: Vec<ProjectStat>,
    pub languages: Vec<ProjectStat>,
    pub editors: Vec<ProjectStat>,
}

/// One named slice of tracked time (a project, language or editor).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectStat {
    pub name: String,
    pub text: String,
    pub percent: f64,
    pub total_seconds: f64,
}
