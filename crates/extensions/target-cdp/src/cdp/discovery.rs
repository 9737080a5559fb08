//! HTTP endpoint discovery (`/json/version`, `/json/list`).

use tracing::debug;

use super::error::CdpError;
use super::protocol::{BrowserVersion, PageInfo};

/// Strip trailing slashes so paths can be appended.
pub(crate) fn normalize_endpoint(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}

/// Fetch browser version info, including the browser WebSocket URL.
pub async fn fetch_version(endpoint: &str) -> Result<BrowserVersion, CdpError> {
    let version_url = format!("{}/json/version", normalize_endpoint(endpoint));
    debug!("Fetching browser version from {}", version_url);

    let unavailable = |e: reqwest::Error| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e));

    let version: BrowserVersion = reqwest::get(&version_url)
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(unavailable)?
        .json()
        .await
        .map_err(unavailable)?;

    debug!("Browser reports {}", version.browser);
    Ok(version)
}

/// List every target the browser exposes, in the order Chrome reports them.
///
/// Chrome lists the most recently focused tab first.
pub async fn list_pages(endpoint: &str) -> Result<Vec<PageInfo>, CdpError> {
    let url = format!("{}/json/list", normalize_endpoint(endpoint));
    let pages: Vec<PageInfo> = reqwest::get(&url)
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(pages)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
