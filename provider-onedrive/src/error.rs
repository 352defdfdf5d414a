use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OneDriveError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Graph API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    #[error("Throttled, retry after {0} seconds")]
    Throttled(u64),

    #[error("Failed to parse Graph response: {0}")]
    ParseError(String),

    #[error("Remote item {item_id} has no drive reference")]
    InvalidRemoteItem { item_id: String },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, OneDriveError>;

impl From<OneDriveError> for BridgeError {
    fn from(error: OneDriveError) -> Self {
        match error {
            OneDriveError::AuthenticationFailed(msg) => BridgeError::ProviderAuth(msg),
            OneDriveError::ApiError {
                status_code,
                message,
            } => BridgeError::ProviderApi {
                status_code,
                message,
            },
            e @ OneDriveError::Throttled(_) => BridgeError::ProviderApi {
                status_code: 429,
                message: e.to_string(),
            },
            e @ OneDriveError::ParseError(_) | e @ OneDriveError::InvalidRemoteItem { .. } => {
                BridgeError::OperationFailed(e.to_string())
            }
            OneDriveError::Bridge(e) => e,
        }
    }
}
