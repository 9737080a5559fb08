//! Subcommand handlers.

use std::sync::Arc;
use std::time::Duration;

use sidescroll_config::{BrowserConfig, Config, ScrollConfig};
use sidescroll_core::{OrchestratorConfig, RetryPolicy, ScrollOrchestrator, ScrollStatus};
use sidescroll_target_cdp::{CdpClient, CdpTargetResolver};
use tokio::sync::watch;
use tracing::{debug, info};

pub(crate) type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Orchestrator settings from the `[scroll]` section.
pub(crate) fn orchestrator_config(scroll: &ScrollConfig) -> OrchestratorConfig {
    OrchestratorConfig {
        settle_delay: Duration::from_millis(scroll.settle_delay_ms),
        retry: RetryPolicy::new(scroll.max_attempts),
    }
}

/// A filter given on the command line wins over the configured one.
pub(crate) fn effective_filter(cli: Option<String>, browser: &BrowserConfig) -> Option<String> {
    cli.filter(|f| !f.trim().is_empty())
        .or_else(|| browser.url_filter().map(str::to_string))
}

async fn connect(browser: &BrowserConfig) -> Result<Arc<CdpClient>, Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(browser.call_timeout_secs);
    let client = CdpClient::connect(&browser.endpoint, timeout).await?;
    info!("Connected to {}", client.browser_ws_url());
    Ok(Arc::new(client))
}

async fn orchestrator(
    config: &Config,
    url_filter: Option<String>,
) -> Result<ScrollOrchestrator, Box<dyn std::error::Error>> {
    let client = connect(&config.browser).await?;
    let resolver = CdpTargetResolver::new(client)
        .with_url_filter(effective_filter(url_filter, &config.browser));
    Ok(ScrollOrchestrator::new(
        Arc::new(resolver),
        orchestrator_config(&config.scroll),
    ))
}

/// Print progress until the session reaches a final status.
async fn print_progress(mut status: watch::Receiver<ScrollStatus>) {
    while status.changed().await.is_ok() {
        let current = status.borrow_and_update().clone();
        if current.is_terminal() {
            break;
        }
        println!("{}", current);
    }
}

/// `sidescroll run`: a session with the overlay; Ctrl-C stops it.
pub(crate) async fn run_session(
    config: &Config,
    count: Option<u32>,
    url_filter: Option<String>,
) -> CmdResult {
    let count = count.unwrap_or(config.scroll.default_count);
    if count == 0 {
        return Err("scroll count must be greater than 0".into());
    }

    let orchestrator = orchestrator(config, url_filter).await?;
    let progress = tokio::spawn(print_progress(orchestrator.subscribe_status()));
    let interrupt = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, stopping after the current scroll");
                orchestrator.stop();
            }
        })
    };

    let result = orchestrator.start(count).await;
    interrupt.abort();
    progress.abort();

    let summary = result?;
    debug!(?summary, "run finished");
    println!("{}", orchestrator.status());
    Ok(())
}

/// `sidescroll scroll`: one scroll, no overlay.
pub(crate) async fn scroll_once(config: &Config, url_filter: Option<String>) -> CmdResult {
    let orchestrator = orchestrator(config, url_filter).await?;
    orchestrator.scroll_once().await?;
    println!("{}", orchestrator.status());
    Ok(())
}

/// `sidescroll tabs`: list candidate tabs, marking the one a run would use.
pub(crate) async fn list_tabs(config: &Config) -> CmdResult {
    let client = connect(&config.browser).await?;
    let resolver = CdpTargetResolver::new(client)
        .with_url_filter(effective_filter(None, &config.browser));
    let pages = resolver.pages().await?;

    if pages.is_empty() {
        println!("No open tabs");
        return Ok(());
    }

    let active = CdpTargetResolver::select(&pages, resolver.url_filter()).map(|p| p.id.clone());
    for page in &pages {
        let marker = if active.as_deref() == Some(page.id.as_str()) { "*" } else { " " };
        println!("{} {}  {}", marker, page.title, page.url);
    }
    Ok(())
}
