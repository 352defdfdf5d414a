use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bridge_traits::error::BridgeError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Missing or malformed Authorization header")]
    MissingSession,

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// JSON body of every error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_auth_error: bool,
}

impl ErrorBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_auth_error: false,
        }
    }

    fn auth(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_auth_error: true,
        }
    }
}

/// Translate provider failures into client-facing responses.
///
/// Returns `None` for errors that are not provider failures; those fall
/// through to [`internal_error`].
pub fn respond_with_error(error: &BridgeError) -> Option<Response> {
    match error {
        BridgeError::ProviderAuth(message) => {
            Some((StatusCode::UNAUTHORIZED, Json(ErrorBody::auth(message.as_str()))).into_response())
        }
        BridgeError::ProviderApi {
            status_code,
            message,
        } => {
            let status = match *status_code {
                code if code >= 500 => StatusCode::BAD_GATEWAY,
                429 => StatusCode::TOO_MANY_REQUESTS,
                code if code >= 400 => StatusCode::FAILED_DEPENDENCY,
                _ => return None,
            };
            Some((status, Json(ErrorBody::new(message.as_str()))).into_response())
        }
        BridgeError::NotAvailable(_) | BridgeError::OperationFailed(_) => None,
    }
}

/// Generic fallback for anything the provider responder does not handle
pub fn internal_error(error: &dyn std::error::Error) -> Response {
    tracing::error!(error = %error, "Unhandled error while serving request");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("Internal server error")),
    )
        .into_response()
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        match self {
            CoreError::MissingSession => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody::auth(CoreError::MissingSession.to_string())),
            )
                .into_response(),
            CoreError::Bridge(error) => {
                respond_with_error(&error).unwrap_or_else(|| internal_error(&error))
            }
        }
    }
}
