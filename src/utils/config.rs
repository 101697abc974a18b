use crate::utils::timezone::ReportTimezone;
use crate::utils::validators::validate_url;
use std::env;
use thiserror::Error;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_WAKATIME_API_URL: &str = "https://wakatime.com/api/v1";
const DEFAULT_COMMIT_FETCH_CONCURRENCY: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GH_TOKEN must be set")]
    MissingToken,
    #[error("Unknown timezone '{name}': {reason}")]
    InvalidTimezone { name: String, reason: String },
    #[error("{key} must be a positive number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be true or false, got '{value}'")]
    InvalidBool { key: &'static str, value: String },
    #[error("{key} is not a valid API URL: {reason}")]
    InvalidUrl { key: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub github_token: String,
    pub wakatime_api_key: Option<String>,
    pub timezone: ReportTimezone,
    pub github_api_url: String,
    pub wakatime_api_url: String,
    pub commit_fetch_concurrency: usize,
    pub readme_debug_path: Option<String>,
    pub dry_run: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Empty values are
    /// treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let github_token = var("GH_TOKEN").ok_or(ConfigError::MissingToken)?;

        let timezone = match var("TIMEZONE") {
            Some(name) => ReportTimezone::parse(&name)?,
            None => ReportTimezone::Local,
        };

        let github_api_url = api_url(
            "GITHUB_API_URL",
            var("GITHUB_API_URL"),
            DEFAULT_GITHUB_API_URL,
        )?;
        let wakatime_api_url = api_url(
            "WAKATIME_API_URL",
            var("WAKATIME_API_URL"),
            DEFAULT_WAKATIME_API_URL,
        )?;

        let commit_fetch_concurrency = match var("COMMIT_FETCH_CONCURRENCY") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "COMMIT_FETCH_CONCURRENCY",
                        value,
                    })
                }
            },
            None => DEFAULT_COMMIT_FETCH_CONCURRENCY,
        };

        let dry_run = match var("DRY_RUN") {
            Some(value) => value
                .trim()
                .to_lowercase()
                .parse()
                .map_err(|_| ConfigError::InvalidBool {
                    key: "DRY_RUN",
                    value,
                })?,
            None => false,
        };

        Ok(Config {
            github_token,
            wakatime_api_key: var("WAKATIME_API_KEY"),
            timezone,
            github_api_url,
            wakatime_api_url,
            commit_fetch_concurrency,
            readme_debug_path: var("README_DEBUG_PATH"),
            dry_run,
        })
    }
}

fn api_url(key: &'static str, value: Option<String>, default: &str) -> Result<String, ConfigError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    validate_url(&raw).map_err(|e| ConfigError::InvalidUrl {
        key,
        reason: e.to_string(),
    })?;
    Ok(raw.trim_end_matches('/').to_string())
}
