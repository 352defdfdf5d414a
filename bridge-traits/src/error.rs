use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    /// The provider rejected the request with a non-success status.
    #[error("Provider API error (status {status_code}): {message}")]
    ProviderApi { status_code: u16, message: String },

    /// The provider rejected the session's credentials.
    #[error("Provider authentication failed: {0}")]
    ProviderAuth(String),
}

impl BridgeError {
    /// Upstream HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            BridgeError::ProviderApi { status_code, .. } => Some(*status_code),
            BridgeError::ProviderAuth(_) => Some(401),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
