use std::time::Duration;

use reqwest::{redirect, Client};
use tracing::{debug, info};

use crate::config::FetchConfig;
use crate::error::SiftError;

pub mod browser;

/// Fetch the page's HTML, either with a plain HTTP GET or a headless render.
pub async fn fetch(url: &str, dynamic: bool, config: &FetchConfig) -> Result<String, SiftError> {
    if dynamic {
        browser::fetch_rendered(url, config).await
    } else {
        fetch_static(url, config).await
    }
}

/// Single HTTP GET with a bounded timeout and an identifying User-Agent.
///
/// The URL is deliberately not validated up front; a malformed URL comes back
/// as a fetch failure like any other.
async fn fetch_static(url: &str, config: &FetchConfig) -> Result<String, SiftError> {
    debug!("fetching {url} over HTTP");

    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(&config.user_agent)
        .redirect(redirect::Policy::limited(10))
        .build()
        .map_err(|e| SiftError::fetch(url, e))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SiftError::fetch(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SiftError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| SiftError::fetch(url, e))?;
    info!("fetched {} bytes from {url}", body.len());
    Ok(body)
}
