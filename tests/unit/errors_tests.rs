/*!
 * Tests for error types and conversions
 */

use chatrelay::errors::{AppError, ConfigError, ProviderError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_unsupportedLanguage_shouldDisplayLanguage() {
    let error = ProviderError::UnsupportedLanguage("elvish".to_string());
    assert!(error.to_string().contains("elvish"));
}

#[test]
fn test_configError_emptyCategory_shouldNameCategory() {
    let error = ConfigError::EmptyCategory { name: "welcome_banner".to_string() };
    let display = error.to_string();
    assert!(display.contains("welcome_banner"));
    assert!(display.contains("no foreground or background pattern"));
}

#[test]
fn test_configError_invalidPattern_shouldExposeSource() {
    let regex_error = regex::Regex::new("(").unwrap_err();
    let error = ConfigError::InvalidPattern { name: "broken".to_string(), source: regex_error };
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_appError_fromConfigError_shouldWrapCorrectly() {
    let app_error: AppError = ConfigError::InvalidLanguage("xx".to_string()).into();
    let display = format!("{}", app_error);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("xx"));
}

#[test]
fn test_appError_fromProviderError_shouldWrapCorrectly() {
    let app_error: AppError = ProviderError::ConnectionError("Network down".to_string()).into();
    assert!(format!("{}", app_error).contains("Provider error"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhow_shouldWrapAsUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(ref msg) if msg.contains("something odd")));
}
