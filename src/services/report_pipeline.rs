use crate::models::{CommitEvent, RepositorySummary, ViewerInfo, WakaTimeStats};
use crate::services::distribution::{CommitDistributions, LanguageDistribution};
use crate::services::git_platforms::{GitHubSource, ReadmeSink};
use crate::services::readme::splice_report;
use crate::services::report::{assemble, ReportInput, COMMIT_MESSAGE};
use crate::services::wakatime::CodingTimeSource;
use crate::utils::config::Config;
use crate::utils::timezone::ReportTimezone;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Datelike, Months, TimeZone, Utc};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

/// What a run produced.
#[derive(Debug)]
pub struct ReportOutcome {
    pub login: String,
    pub content: String,
    pub committed: bool,
}

pub struct ReportService {
    github: Arc<dyn GitHubSource>,
    readme: Arc<dyn ReadmeSink>,
    wakatime: Option<Arc<dyn CodingTimeSource>>,
    timezone: ReportTimezone,
    commit_fetch_concurrency: usize,
    readme_debug_path: Option<String>,
    dry_run: bool,
}

impl ReportService {
    pub fn new(
        config: &Config,
        github: Arc<dyn GitHubSource>,
        readme: Arc<dyn ReadmeSink>,
        wakatime: Option<Arc<dyn CodingTimeSource>>,
    ) -> Self {
        Self {
            github,
            readme,
            wakatime,
            timezone: config.timezone,
            commit_fetch_concurrency: config.commit_fetch_concurrency.max(1),
            readme_debug_path: config.readme_debug_path.clone(),
            dry_run: config.dry_run,
        }
    }

    /// Fetch everything, render the report and splice it into the README
    pub async fn run(&self, now: DateTime<Utc>) -> Result<ReportOutcome> {
        let (viewer, content) = self.build_report(now).await?;
        let committed = self.publish(&viewer.login, &content).await?;

        Ok(ReportOutcome {
            login: viewer.login,
            content,
            committed,
        })
    }

    /// Everything up to, but not including, the README write
    pub async fn build_report(&self, now: DateTime<Utc>) -> Result<(ViewerInfo, String)> {
        let viewer = self
            .github
            .fetch_viewer()
            .await
            .context("get user info failed")?;

        let year_start = Utc
            .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| anyhow!("Cannot build Jan 1 of {}", now.year()))?;
        let issues_since = now.checked_sub_months(Months::new(1)).unwrap_or(now);

        let user = self
            .github
            .fetch_user_data(&viewer.login, year_start, issues_since)
            .await
            .context("get user data failed")?;

        let week_start = self.timezone.start_of_week(now);
        log::info!(
            "📅 Counting commits since {} ({})",
            week_start,
            self.timezone.name()
        );

        let events = self
            .fetch_commit_events(&viewer, &user.repositories, week_start)
            .await?;
        let commits = CommitDistributions::from_events(&events, &self.timezone);
        log::info!(
            "📊 Collected {} commits across {} repositories",
            commits.total(),
            user.repositories.len()
        );

        let languages = LanguageDistribution::from_repositories(&user.repositories);
        let wakatime = self.fetch_wakatime().await;

        let content = assemble(&ReportInput {
            year: now.year(),
            user: &user,
            commits: &commits,
            languages: &languages,
            wakatime: wakatime.as_ref(),
        });

        Ok((viewer, content))
    }

    /// One history request per repository, at most `commit_fetch_concurrency`
    /// in flight. Events come back grouped in repository-list order.
    async fn fetch_commit_events(
        &self,
        viewer: &ViewerInfo,
        repositories: &[RepositorySummary],
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitEvent>> {
        let author_id = viewer.id.as_str();

        let batches: Vec<Vec<CommitEvent>> = stream::iter(repositories)
            .map(|repo| async move {
                self.github
                    .fetch_commit_history(repo, author_id, since)
                    .await
                    .with_context(|| {
                        format!(
                            "fetching commits for {}/{} failed",
                            repo.owner_login, repo.name
                        )
                    })
            })
            .buffered(self.commit_fetch_concurrency)
            .try_collect()
            .await?;

        Ok(batches.into_iter().flatten().collect())
    }

    /// A WakaTime failure only costs the time-tracking section.
    async fn fetch_wakatime(&self) -> Option<WakaTimeStats> {
        let source = self.wakatime.as_ref()?;
        match source.fetch_weekly_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                log::warn!("⚠️  Skipping WakaTime section: {:#}", e);
                None
            }
        }
    }

    /// Returns whether a commit was made
    async fn publish(&self, login: &str, content: &str) -> Result<bool> {
        let readme = self.readme.fetch_readme(login).await?;
        let patched = splice_report(&readme.content, content)?;

        if let Some(path) = &self.readme_debug_path {
            tokio::fs::write(path, &patched)
                .await
                .with_context(|| format!("writing debug README to {} failed", path))?;
            log::info!("📝 Wrote patched README to {}", path);
        }

        if self.dry_run {
            log::info!("Dry run: not committing {}", readme.path);
            return Ok(false);
        }

        if patched == readme.content {
            log::info!("{} is already up to date", readme.path);
            return Ok(false);
        }

        self.readme
            .update_readme(login, &readme, &patched, COMMIT_MESSAGE)
            .await?;
        Ok(true)
    }
}
