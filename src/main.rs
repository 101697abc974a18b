mod models;
mod services;
#[cfg(test)]
mod test_utils;
mod utils;

use anyhow::{Context, Result};
use services::git_platforms::{GitHubClient, PlatformConfig};
use services::report_pipeline::ReportService;
use services::wakatime::{CodingTimeSource, WakaTimeClient};
use std::sync::Arc;
use utils::{config::Config, http_client::create_http_client};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file FIRST before anything else
    dotenv::dotenv().ok();

    // Initialize logger with default level if RUST_LOG not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("Failed to load configuration")?;
    log::info!(
        "📝 Configuration loaded: timezone {}, WakaTime {}, concurrency {}{}",
        config.timezone.name(),
        if config.wakatime_api_key.is_some() {
            "ENABLED"
        } else {
            "DISABLED"
        },
        config.commit_fetch_concurrency,
        if config.dry_run { ", dry run" } else { "" }
    );

    let http = create_http_client().context("Failed to create HTTP client")?;

    let github = Arc::new(GitHubClient::new(
        http.clone(),
        PlatformConfig::custom(&config.github_api_url),
        config.github_token.clone(),
    ));
    let wakatime = config.wakatime_api_key.clone().map(|key| {
        Arc::new(WakaTimeClient::new(http.clone(), &config.wakatime_api_url, key))
            as Arc<dyn CodingTimeSource>
    });

    let service = ReportService::new(&config, github.clone(), github, wakatime);
    let outcome = match service.run(chrono::Utc::now()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("❌ README update failed: {:#}", e);
            return Err(e);
        }
    };

    println!("{}", outcome.content);
    if outcome.committed {
        log::info!("✅ build readme successful for {}!", outcome.login);
    } else {
        log::info!("build readme finished for {}, nothing committed", outcome.login);
    }

    Ok(())
}
