//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Settle delays below this rarely give lazy-loaded lists time to render.
const MIN_SETTLE_DELAY_MS: u64 = 500;
/// Counts above this usually mean a typo.
const LARGE_COUNT: u32 = 500;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_scroll(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        match url::Url::parse(&config.browser.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => result.add_error(ValidationError::new(
                "browser.endpoint",
                format!("Unsupported scheme '{}', expected http or https", url.scheme()),
            )),
            Err(e) => result.add_error(ValidationError::new(
                "browser.endpoint",
                format!("Invalid URL: {}", e),
            )),
        }

        if config.browser.call_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "browser.call_timeout_secs",
                "Call timeout must be greater than 0",
            ));
        }
    }

    fn validate_scroll(config: &Config, result: &mut ValidationResult) {
        let scroll = &config.scroll;

        if scroll.default_count == 0 {
            result.add_error(ValidationError::new(
                "scroll.default_count",
                "Default count must be greater than 0",
            ));
        } else if scroll.default_count > LARGE_COUNT {
            result.add_warning(ValidationWarning::new(
                "scroll.default_count",
                format!("Default count {} is very high", scroll.default_count),
            ));
        }

        if scroll.max_attempts == 0 {
            result.add_error(ValidationError::new(
                "scroll.max_attempts",
                "Max attempts must be at least 1",
            ));
        }

        if scroll.settle_delay_ms < MIN_SETTLE_DELAY_MS {
            result.add_warning(ValidationWarning::new(
                "scroll.settle_delay_ms",
                format!(
                    "Settle delay of {}ms may not let the page finish loading",
                    scroll.settle_delay_ms
                ),
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.dir.trim().is_empty() {
            result.add_error(ValidationError::new("logging.dir", "Log directory cannot be empty"));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
