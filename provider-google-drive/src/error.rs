//! Error types for Google Drive provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Google Drive provider errors
#[derive(Error, Debug)]
pub enum GoogleDriveError {
    /// Authentication failed or token is invalid
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// API request returned an error
    #[error("Google Drive API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    /// File not found, with the message Drive returned
    #[error("File not found: {file_id} ({message})")]
    FileNotFound { file_id: String, message: String },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Shortcut item without a target
    #[error("Shortcut {file_id} has no target")]
    InvalidShortcut { file_id: String },

    /// Shortcut chain did not end in a regular file
    #[error("Shortcut {file_id} did not resolve within {hops} hops")]
    ShortcutDepthExceeded { file_id: String, hops: usize },

    /// Bridge error
    #[error(transparent)]
    BridgeError(#[from] BridgeError),
}

/// Result type for Google Drive operations
pub type Result<T> = std::result::Result<T, GoogleDriveError>;

impl From<GoogleDriveError> for BridgeError {
    fn from(error: GoogleDriveError) -> Self {
        match error {
            GoogleDriveError::AuthenticationFailed(msg) => BridgeError::ProviderAuth(msg),
            GoogleDriveError::ApiError {
                status_code,
                message,
            } => BridgeError::ProviderApi {
                status_code,
                message,
            },
            GoogleDriveError::RateLimitExceeded {
                retry_after_seconds,
            } => BridgeError::ProviderApi {
                status_code: 429,
                message: format!(
                    "Rate limit exceeded, retry after {} seconds",
                    retry_after_seconds
                ),
            },
            GoogleDriveError::FileNotFound { message, .. } => BridgeError::ProviderApi {
                status_code: 404,
                message,
            },
            GoogleDriveError::ParseError(msg) => {
                BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            e @ GoogleDriveError::InvalidShortcut { .. }
            | e @ GoogleDriveError::ShortcutDepthExceeded { .. } => {
                BridgeError::OperationFailed(e.to_string())
            }
            GoogleDriveError::BridgeError(e) => e,
        }
    }
}
