use reqwest::{Client, ClientBuilder};
use std::time::Duration;

pub const USER_AGENT: &str = concat!("readme-stats/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client for the GitHub and WakaTime APIs
pub fn create_http_client() -> reqwest::Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .build()
}
