use super::formatter::stat_line;
use crate::models::wakatime::UNKNOWN_PROJECT;
use crate::models::{IssueSummary, WakaTimeStats};
use crate::services::distribution::{
    ratio, weekday_name, CommitDistributions, Distribution, LanguageDistribution, TimeBucket, WEEK,
};

const FENCE_OPEN: &str = "```text\n";
const FENCE_CLOSE: &str = "```\n";

/// Numbers behind the profile block.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileSummary {
    pub year: i32,
    pub total_contributions: u64,
    pub total_disk_usage_kb: u64,
    pub is_hireable: bool,
    pub public_repositories: u64,
    pub private_repositories: u64,
}

/// Markdown links to recent issues, newest first. `issues` arrives in
/// ascending update order, so each one is placed in front of the previous.
pub fn render_issues(issues: &[IssueSummary]) -> String {
    let mut content = String::from("\n");
    for issue in issues {
        content = format!("[{}]({})\n\n{}", issue.title, issue.url, content);
    }
    content
}

pub fn render_profile(profile: &ProfileSummary) -> String {
    let disk_usage_mb = profile.total_disk_usage_kb as f64 / 1024.0;

    let mut content = String::from("**🐱 My Github Data**\n");
    content += &format!(
        "> 🏆 {} Contributions in the Year {}\n >\n",
        profile.total_contributions, profile.year
    );
    content += &format!("> 📦 {:.2} MB Used in Github's Storage\n >\n", disk_usage_mb);
    if profile.is_hireable {
        content += "> 💼 Opted to Hire\n >\n";
    } else {
        content += "> 🚫 Not Opted to Hire\n >\n";
    }
    content += &format!("> 🚪 {} Public Repositories\n >\n", profile.public_repositories);
    content += &format!("> 🔑 {} Private Repositories\n >\n", profile.private_repositories);
    content
}

/// Time-of-day, weekday and per-repository blocks.
pub fn render_commit_distributions(commits: &CommitDistributions) -> String {
    let mut content = String::new();

    content += "\n";
    content += "**I'm an Early 🐤** \n";
    content += FENCE_OPEN;
    for bucket in TimeBucket::DISPLAY_ORDER {
        content += &commit_line(bucket.label(), &commits.by_time, &bucket);
    }
    content += FENCE_CLOSE;

    let best_day = commits.by_weekday.leader().map_or("", |day| weekday_name(*day));
    content += "\n";
    content += &format!("**📅 I'm Most Productive on {}**\n", best_day);
    content += FENCE_OPEN;
    for day in WEEK {
        content += &commit_line(weekday_name(day), &commits.by_weekday, &day);
    }
    content += FENCE_CLOSE;

    let best_repo = commits.by_repository.leader().map_or("", String::as_str);
    content += "\n";
    content += &format!("**📽 I'm Most Contribute to {}**\n", best_repo);
    content += FENCE_OPEN;
    for repo in commits.by_repository.sorted_keys() {
        if commits.by_repository.count(repo) == 0 {
            continue;
        }
        content += &commit_line(repo, &commits.by_repository, repo);
    }
    content += FENCE_CLOSE;
    content += "\n";

    content
}

fn commit_line<K>(label: &str, distribution: &Distribution<K>, key: &K) -> String
where
    K: Eq + std::hash::Hash + Clone,
{
    let count = distribution.count(key);
    let share = distribution.share(key);
    stat_line(label, &format!("{} commits", count), share, share * 100.0)
}

/// Languages sorted by name, each scaled against the user's repository count.
pub fn render_languages(languages: &LanguageDistribution, total_repository_count: u64) -> String {
    let mostly = languages.languages.leader().map_or("", String::as_str);

    let mut content = String::from("\n");
    content += &format!("**❤ I Mostly Code in {}**\n", mostly);
    content += "\n";
    content += FENCE_OPEN;
    for language in languages.languages.sorted_keys() {
        let repos = languages.languages.count(language);
        let share = ratio(repos, total_repository_count);
        content += &stat_line(language, &format!("{} repos", repos), share, share * 100.0);
    }
    content += FENCE_CLOSE;
    content
}

/// WakaTime projects in the order WakaTime reports them.
pub fn render_time_tracking(stats: &WakaTimeStats) -> String {
    let mut content = String::from("\n");
    content += "**📊 This Week I Spent My Time On**\n";
    content += FENCE_OPEN;
    for project in stats.projects.iter().filter(|p| p.name != UNKNOWN_PROJECT) {
        content += &stat_line(
            &project.name,
            &project.text,
            project.percent / 100.0,
            project.percent,
        );
    }
    content += FENCE_CLOSE;
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wakatime::ProjectStat;
    use crate::models::{CommitEvent, RepositorySummary};
    use crate::utils::timezone::ReportTimezone;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn issue(title: &str, updated_at: &str) -> IssueSummary {
        IssueSummary {
            title: title.to_string(),
            url: format!("https://github.com/octocat/hello/issues/{}", title),
            updated_at: utc(updated_at),
            state: "OPEN".to_string(),
        }
    }

    #[test]
    fn test_issues_newest_first() {
        let issues = vec![
            issue("A", "2024-03-01T10:00:00Z"),
            issue("B", "2024-03-02T10:00:00Z"),
        ];

        assert_eq!(
            render_issues(&issues),
            "[B](https://github.com/octocat/hello/issues/B)\n\n\
             [A](https://github.com/octocat/hello/issues/A)\n\n\n"
        );
    }

    #[test]
    fn test_issues_empty() {
        assert_eq!(render_issues(&[]), "\n");
    }

    #[test]
    fn test_profile() {
        let profile = ProfileSummary {
            year: 2024,
            total_contributions: 321,
            total_disk_usage_kb: 2048 + 512,
            is_hireable: true,
            public_repositories: 7,
            private_repositories: 2,
        };

        assert_eq!(
            render_profile(&profile),
            "**🐱 My Github Data**\n\
             > 🏆 321 Contributions in the Year 2024\n >\n\
             > 📦 2.50 MB Used in Github's Storage\n >\n\
             > 💼 Opted to Hire\n >\n\
             > 🚪 7 Public Repositories\n >\n\
             > 🔑 2 Private Repositories\n >\n"
        );

        let not_hireable = ProfileSummary {
            is_hireable: false,
            ..profile
        };
        assert!(render_profile(&not_hireable).contains("> 🚫 Not Opted to Hire\n >\n"));
    }

    #[test]
    fn test_commit_distributions_scenario() {
        // Three repositories with 5, 3 and 0 commits, all Tuesday morning.
        let tz = ReportTimezone::parse("UTC").unwrap();
        let tuesday_morning = utc("2024-03-05T09:30:00Z");
        let mut events = Vec::new();
        events.extend((0..5).map(|_| CommitEvent::new("web", tuesday_morning)));
        events.extend((0..3).map(|_| CommitEvent::new("api", tuesday_morning)));

        let commits = CommitDistributions::from_events(&events, &tz);
        let rendered = render_commit_distributions(&commits);

        let full = "#".repeat(25);
        let empty = "-".repeat(25);
        let expected = [
            "\n**I'm an Early 🐤** \n```text\n".to_string(),
            format!("Morning\t\t8 commits\t{}\t100.00%\n", full),
            format!("Daytime\t\t0 commits\t{}\t0.00%\n", empty),
            format!("Evening\t\t0 commits\t{}\t0.00%\n", empty),
            format!("Night\t\t0 commits\t{}\t0.00%\n", empty),
            "```\n\n**📅 I'm Most Productive on Tuesday**\n```text\n".to_string(),
            format!("Monday\t\t0 commits\t{}\t0.00%\n", empty),
            format!("Tuesday\t\t8 commits\t{}\t100.00%\n", full),
            format!("Wednesday\t0 commits\t{}\t0.00%\n", empty),
            format!("Thursday\t0 commits\t{}\t0.00%\n", empty),
            format!("Friday\t\t0 commits\t{}\t0.00%\n", empty),
            format!("Saturday\t0 commits\t{}\t0.00%\n", empty),
            format!("Sunday\t\t0 commits\t{}\t0.00%\n", empty),
            "```\n\n**📽 I'm Most Contribute to web**\n```text\n".to_string(),
            format!("api\t\t3 commits\t{}{}\t37.50%\n", "#".repeat(9), "-".repeat(16)),
            format!("web\t\t5 commits\t{}{}\t62.50%\n", "#".repeat(15), "-".repeat(10)),
            "```\n\n".to_string(),
        ]
        .concat();

        assert_eq!(rendered, expected);
        assert!(!rendered.contains("docs"));
    }

    #[test]
    fn test_time_of_day_header_is_fixed() {
        let tz = ReportTimezone::parse("UTC").unwrap();
        let events = vec![CommitEvent::new("web", utc("2024-03-05T23:00:00Z"))];

        let rendered = render_commit_distributions(&CommitDistributions::from_events(&events, &tz));

        assert_eq!(rendered.lines().nth(1), Some("**I'm an Early 🐤** "));
        assert!(rendered.contains(&format!("Evening\t\t1 commits\t{}\t100.00%\n", "#".repeat(25))));
    }

    #[test]
    fn test_commit_distributions_without_commits() {
        let tz = ReportTimezone::parse("UTC").unwrap();
        let commits = CommitDistributions::from_events(&[], &tz);

        let rendered = render_commit_distributions(&commits);

        assert!(rendered.contains("**📅 I'm Most Productive on **\n"));
        assert!(rendered.contains("**📽 I'm Most Contribute to **\n"));
        let percent_lines: Vec<&str> = rendered.lines().filter(|l| l.ends_with('%')).collect();
        assert_eq!(percent_lines.len(), 4 + 7);
        assert!(percent_lines.iter().all(|l| l.ends_with("\t0.00%")));
        assert!(!rendered.contains("NaN"));
    }

    #[test]
    fn test_languages_sorted_by_name() {
        let repo = |name: &str, language: Option<&str>| RepositorySummary {
            name: name.to_string(),
            owner_login: "octocat".to_string(),
            primary_language: language.map(String::from),
            is_private: false,
            disk_usage_kb: 0,
            default_branch: Some("main".to_string()),
        };
        let repos = vec![
            repo("a", Some("Rust")),
            repo("b", None),
            repo("c", Some("Go")),
            repo("d", Some("Rust")),
        ];
        let languages = LanguageDistribution::from_repositories(&repos);

        let rendered = render_languages(&languages, 4);

        let expected = [
            "\n**❤ I Mostly Code in Rust**\n\n```text\n".to_string(),
            format!("Go\t\t1 repos\t\t{}{}\t25.00%\n", "#".repeat(6), "-".repeat(19)),
            format!("Other\t\t1 repos\t\t{}{}\t25.00%\n", "#".repeat(6), "-".repeat(19)),
            format!("Rust\t\t2 repos\t\t{}{}\t50.00%\n", "#".repeat(12), "-".repeat(13)),
            "```\n".to_string(),
        ]
        .concat();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_languages_without_repositories() {
        let languages = LanguageDistribution::from_repositories(&[]);
        assert_eq!(
            render_languages(&languages, 0),
            "\n**❤ I Mostly Code in **\n\n```text\n```\n"
        );
    }

    #[test]
    fn test_time_tracking_skips_unknown_project() {
        let stats = WakaTimeStats {
            projects: vec![
                ProjectStat {
                    name: "readme-stats".to_string(),
                    text: "3 hrs 12 mins".to_string(),
                    percent: 80.0,
                    total_seconds: 11520.0,
                },
                ProjectStat {
                    name: "Unknown Project".to_string(),
                    text: "48 mins".to_string(),
                    percent: 20.0,
                    total_seconds: 2880.0,
                },
            ],
            ..Default::default()
        };

        assert_eq!(
            render_time_tracking(&stats),
            format!(
                "\n**📊 This Week I Spent My Time On**\n```text\n\
                 readme-stats\t3 hrs 12 mins\t{}{}\t80.00%\n```\n",
                "#".repeat(20),
                "-".repeat(5)
            )
        );
    }
}
