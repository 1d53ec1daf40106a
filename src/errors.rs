/*!
 * Error types for the chatrelay library.
 *
 * The chat pipeline itself reports failures as data (an empty translation
 * outcome, a "no match" filter decision). These types cover the edges around
 * it: provider calls, configuration loading and the host-simulator binary.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The service cannot translate into the requested language
    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),
}

/// Errors raised while loading or compiling configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A rule category with neither a foreground nor a background pattern
    #[error("Rule category '{name}' has no foreground or background pattern")]
    EmptyCategory {
        /// Category name
        name: String,
    },

    /// A rule pattern that does not compile
    #[error("Rule category '{name}' has an invalid pattern: {source}")]
    InvalidPattern {
        /// Category name
        name: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A target language that cannot be resolved to an ISO code
    #[error("Invalid target language: {0}")]
    InvalidLanguage(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from configuration loading
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
