use super::*;

#[test]
fn test_validate_default_config() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_invalid_endpoint() {
    let mut config = Config::default();
    config.browser.endpoint = "not a url".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "browser.endpoint"));
}

#[test]
fn test_validate_websocket_endpoint_rejected() {
    let mut config = Config::default();
    config.browser.endpoint = "ws://localhost:9222".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors[0].message.contains("ws"));
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = Config::default();
    config.browser.call_timeout_secs = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.call_timeout_secs"));
}

#[test]
fn test_validate_zero_count() {
    let mut config = Config::default();
    config.scroll.default_count = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "scroll.default_count"));
}

#[test]
fn test_validate_high_count_warning() {
    let mut config = Config::default();
    config.scroll.default_count = 5000;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "scroll.default_count"));
}

#[test]
fn test_validate_zero_attempts() {
    let mut config = Config::default();
    config.scroll.max_attempts = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "scroll.max_attempts"));
}

#[test]
fn test_validate_short_settle_delay_warning() {
    let mut config = Config::default();
    config.scroll.settle_delay_ms = 100;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "scroll.settle_delay_ms"));
}

#[test]
fn test_validate_empty_log_dir() {
    let mut config = Config::default();
    config.logging.dir = String::new();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "logging.dir"));
}

#[test]
fn test_into_result_returns_first_error() {
    let mut config = Config::default();
    config.scroll.default_count = 0;
    config.scroll.max_attempts = 0;

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "scroll.default_count"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_into_result_passes_warnings_through() {
    let mut config = Config::default();
    config.scroll.settle_delay_ms = 0;

    let warnings = ConfigValidator::validate(&config).into_result().unwrap();
    assert_eq!(warnings.len(), 1);
}
