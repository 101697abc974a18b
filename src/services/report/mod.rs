pub mod formatter;
pub mod sections;

use crate::models::{UserData, WakaTimeStats};
use crate::services::distribution::{CommitDistributions, LanguageDistribution};
use sections::{
    render_commit_distributions, render_issues, render_languages, render_profile,
    render_time_tracking, ProfileSummary,
};

pub const COMMIT_MESSAGE: &str = "update README.md.";

/// Everything the report sections are rendered from.
pub struct ReportInput<'a> {
    pub year: i32,
    pub user: &'a UserData,
    pub commits: &'a CommitDistributions,
    pub languages: &'a LanguageDistribution,
    /// Present only when WakaTime is configured and its fetch succeeded.
    pub wakatime: Option<&'a WakaTimeStats>,
}

/// Concatenate the sections in their fixed order.
pub fn assemble(input: &ReportInput<'_>) -> String {
    let profile = ProfileSummary {
        year: input.year,
        total_contributions: input.user.total_contributions,
        total_disk_usage_kb: input.user.total_disk_usage_kb,
        is_hireable: input.user.is_hireable,
        public_repositories: input.languages.public_repositories,
        private_repositories: input.languages.private_repositories,
    };

    let mut sections = vec![
        render_issues(&input.user.issues),
        render_profile(&profile),
        render_commit_distributions(input.commits),
        render_languages(input.languages, input.user.total_repository_count),
    ];
    if let Some(stats) = input.wakatime {
        sections.push(render_time_tracking(stats));
    }

    sections.concat()
}
