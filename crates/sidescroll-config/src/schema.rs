//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub scroll: ScrollConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Browser connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Only tabs whose URL contains this substring are considered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_filter: Option<String>,

    #[serde(default = "default_call_timeout")]
    pub call_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            url_filter: None,
            call_timeout_secs: default_call_timeout(),
        }
    }
}

impl BrowserConfig {
    /// The URL filter, with an empty string treated as unset.
    pub fn url_filter(&self) -> Option<&str> {
        self.url_filter.as_deref().filter(|f| !f.trim().is_empty())
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_call_timeout() -> u64 {
    30
}

/// Scroll session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Scrolls per session when the command line gives no count.
    #[serde(default = "default_count")]
    pub default_count: u32,

    /// Wait between scrolls, in milliseconds.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Sends per scroll command, including the one after re-injection.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            settle_delay_ms: default_settle_delay(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_count() -> u32 {
    10
}

fn default_settle_delay() -> u64 {
    1500
}

fn default_max_attempts() -> u32 {
    2
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for the rolling log files. `~` is expanded.
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: default_log_dir(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "~/.sidescroll/logs".to_string()
}
