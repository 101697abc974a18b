use anyhow::{anyhow, Result};
use url::Url;

/// Validate that a string is a valid URL with http or https scheme
pub fn validate_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str).map_err(|e| anyhow!("Invalid URL format: {}", e))?;

    // Only allow http and https schemes
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!(
            "URL must use http or https scheme, got: {}",
            url.scheme()
        ));
    }

    if url.host_str().is_none() {
        return Err(anyhow!("URL must have a host"));
    }

    Ok(url)
}

/// Validate a GitHub login (alphanumeric and hyphens, 1-39 chars) before it is
/// spliced into a REST path.
pub fn validate_login(login: &str) -> Result<()> {
    if login.is_empty() || login.len() > 39 {
        return Err(anyhow!("Login must be between 1 and 39 characters"));
    }

    if !login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(anyhow!(
            "Login can only contain alphanumeric characters and hyphens"
        ));
    }

    Ok(())
}
