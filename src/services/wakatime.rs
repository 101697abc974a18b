use crate::models::WakaTimeStats;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Source of coding-time statistics.
#[async_trait]
pub trait CodingTimeSource: Send + Sync {
    /// Stats for the trailing seven days
    async fn fetch_weekly_stats(&self) -> Result<WakaTimeStats>;
}

pub struct WakaTimeClient {
    http: Client,
    api_base_url: String,
    api_key: String,
}

impl WakaTimeClient {
    pub fn new(http: Client, api_base_url: &str, api_key: String) -> Self {
        Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn stats_url(&self) -> String {
        format!("{}/users/current/stats/last_7_days", self.api_base_url)
    }
}

#[async_trait]
impl CodingTimeSource for WakaTimeClient {
    async fn fetch_weekly_stats(&self) -> Result<WakaTimeStats> {
        let response = self
            .http
            .get(self.stats_url())
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(request_failed(status, &error_text));
        }

        let body = response.text().await?;
        let stats = parse_stats(&body)?;

        log::info!(
            "⏱️  WakaTime reported {} projects ({})",
            stats.projects.len(),
            stats.human_readable_total
        );

        Ok(stats)
    }
}

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    data: WakaTimeStats,
}

fn request_failed(status: StatusCode, body: &str) -> anyhow::Error {
    anyhow!(
        "WakaTime stats request failed with status {}: {}",
        status,
        body.trim()
    )
}

fn parse_stats(body: &str) -> Result<WakaTimeStats> {
    let envelope: StatsEnvelope = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to decode WakaTime stats: {}", e))?;
    Ok(envelope.data)
}
