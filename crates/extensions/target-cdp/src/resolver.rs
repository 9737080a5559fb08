//! Active-tab resolution over the CDP endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use sidescroll_protocols::{RemoteTarget, TargetError, TargetResolver};
use tracing::{debug, info};

use crate::cdp::{CdpClient, CdpError, PageInfo};
use crate::target::CdpTarget;

/// Resolves the tab the user last focused, optionally narrowed by URL.
pub struct CdpTargetResolver {
    client: Arc<CdpClient>,
    url_filter: Option<String>,
}

impl CdpTargetResolver {
    pub fn new(client: Arc<CdpClient>) -> Self {
        Self {
            client,
            url_filter: None,
        }
    }

    /// Only consider tabs whose URL contains `filter`.
    pub fn with_url_filter(mut self, filter: Option<String>) -> Self {
        self.url_filter = filter.filter(|f| !f.trim().is_empty());
        self
    }

    pub fn url_filter(&self) -> Option<&str> {
        self.url_filter.as_deref()
    }

    /// Tabs that can host the page handler, most recently focused first.
    pub async fn pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        let pages = self.client.list_pages().await?;
        Ok(pages.into_iter().filter(PageInfo::is_scriptable_page).collect())
    }

    /// Pick the active tab from a `/json/list` listing.
    pub fn select<'a>(pages: &'a [PageInfo], url_filter: Option<&str>) -> Option<&'a PageInfo> {
        pages
            .iter()
            .filter(|p| p.is_scriptable_page())
            .find(|p| url_filter.is_none_or(|f| p.url.contains(f)))
    }
}

#[async_trait]
impl TargetResolver for CdpTargetResolver {
    async fn resolve(&self) -> Result<Arc<dyn RemoteTarget>, TargetError> {
        let pages = self.client.list_pages().await?;
        debug!("Endpoint lists {} targets", pages.len());

        let page = Self::select(&pages, self.url_filter()).ok_or_else(|| {
            TargetError::NoActiveTarget(match self.url_filter() {
                Some(filter) => format!("no open tab matches '{}'", filter),
                None => "no open tabs".to_string(),
            })
        })?;

        info!("Using tab {} ({})", page.id, page.url);
        let target = CdpTarget::attach(self.client.clone(), page.clone()).await?;
        Ok(Arc::new(target))
    }
}
