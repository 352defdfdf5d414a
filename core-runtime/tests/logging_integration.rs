//! Integration tests for logging system

use core_runtime::logging::{redact_if_sensitive, LogFormat, LogLevel, LoggingConfig};
use core_runtime::Error;

#[test]
fn test_logging_initialization() {
    // Logging can only be initialized once per process, so only the
    // configuration surface is exercised here.

    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Debug)
        .with_spans(true);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Debug);
    assert!(config.enable_spans);
}

#[test]
fn test_redaction_of_credentials() {
    assert_eq!(redact_if_sensitive("access_token", "ya29.a0Af"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("refresh_token", "1//0g"), "[REDACTED]");
    assert_eq!(
        redact_if_sensitive("authorization", "Bearer ya29.a0Af"),
        "[REDACTED]"
    );
}

#[test]
fn test_non_sensitive_fields_pass_through_unchanged() {
    assert_eq!(
        redact_if_sensitive("owner", "élodie@example.com"),
        "élodie@example.com"
    );
    assert_eq!(redact_if_sensitive("name", "写真.jpg"), "写真.jpg");
}

#[test]
fn test_redaction_leaves_plain_values() {
    assert_eq!(redact_if_sensitive("file_id", "file123"), "file123");
    assert_eq!(redact_if_sensitive("mime_type", "image/jpeg"), "image/jpeg");
}

#[test]
fn test_level_ordering() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert_eq!(LogLevel::Info.to_string(), "info");
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
}

#[test]
fn test_unknown_format_is_config_error() {
    let result = "yaml".parse::<LogFormat>();
    assert!(matches!(result, Err(Error::Config(_))));
}
