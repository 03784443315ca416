use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, WatchError};

const TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = "Mozilla/5.0 (compatible; APISWatcher/1.0)";

/// Fetch the page body as text. Single attempt; a transport error or a
/// non-2xx status aborts the run.
pub async fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|e| WatchError::Fetch {
            url: url.to_string(),
            source: e,
        })?;

    info!("Fetching {}", url);
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| WatchError::Fetch {
            url: url.to_string(),
            source: e,
        })?;

    let body = response.text().await.map_err(|e| WatchError::Fetch {
        url: url.to_string(),
        source: e,
    })?;

    debug!("Fetched {} bytes", body.len());
    Ok(body)
}
