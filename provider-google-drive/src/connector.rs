//! Google Drive API connector implementation
//!
//! Implements the `StorageProvider` trait for Google Drive API v3.

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::{FileMetadata, ProviderUserSession, StorageProvider};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::{GoogleDriveError, Result};
use crate::types::{DriveErrorResponse, DriveFile};

/// Google Drive API base URL
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Fields to request for file resources
const FILE_FIELDS: &str = "kind,id,name,mimeType,size,modifiedTime,iconLink,thumbnailLink,\
imageMediaMetadata,videoMediaMetadata,shortcutDetails(targetId,targetMimeType)";

/// Maximum number of shortcut hops followed before giving up
pub const MAX_SHORTCUT_HOPS: usize = 4;

/// Google Drive API connector
///
/// Implements `StorageProvider` for Google Drive API v3.
///
/// # Features
///
/// - Single-file metadata lookup including image EXIF and video details
/// - Shared drive support (`supportsAllDrives=true`)
/// - Transparent shortcut resolution, bounded to [`MAX_SHORTCUT_HOPS`]
///
/// # Example
///
/// ```ignore
/// use provider_google_drive::GoogleDriveConnector;
/// use bridge_traits::storage::{ProviderUserSession, StorageProvider};
///
/// let connector = GoogleDriveConnector::new(http_client);
/// let session = ProviderUserSession::new(access_token);
/// let metadata = connector.get_file_metadata(&session, "file123").await?;
/// ```
pub struct GoogleDriveConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// API base URL without trailing slash
    api_base: String,
}

impl GoogleDriveConnector {
    /// Create a connector against the public Drive endpoint
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_api_base(http_client, DRIVE_API_BASE)
    }

    /// Create a connector against a custom API base (test servers, proxies)
    pub fn with_api_base(http_client: Arc<dyn HttpClient>, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            api_base,
        }
    }

    fn file_url(&self, file_id: &str) -> String {
        format!(
            "{}/files/{}?fields={}&supportsAllDrives=true",
            self.api_base,
            urlencoding::encode(file_id),
            urlencoding::encode(FILE_FIELDS)
        )
    }

    /// Fetch one file resource without following shortcuts
    #[instrument(skip(self, session))]
    async fn fetch_file(&self, session: &ProviderUserSession, file_id: &str) -> Result<DriveFile> {
        let request = HttpRequest::new(HttpMethod::Get, self.file_url(file_id))
            .bearer_token(session.access_token())
            .header("Accept", "application/json");

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            let error = Self::error_from_response(file_id, &response);
            warn!(status = response.status, error = %error, "Drive request failed");
            return Err(error);
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| GoogleDriveError::ParseError(e.to_string()))
    }

    /// Classify a non-2xx Drive response
    fn error_from_response(file_id: &str, response: &HttpResponse) -> GoogleDriveError {
        let envelope = serde_json::from_slice::<DriveErrorResponse>(&response.body).ok();
        let rate_limited = envelope
            .as_ref()
            .map(|e| e.error.is_rate_limited())
            .unwrap_or(false);
        let message = envelope
            .map(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| String::from_utf8_lossy(&response.body).trim().to_string());

        match response.status {
            401 => GoogleDriveError::AuthenticationFailed(message),
            404 => GoogleDriveError::FileNotFound {
                file_id: file_id.to_string(),
                message: if message.is_empty() {
                    format!("File not found: {}", file_id)
                } else {
                    message
                },
            },
            429 => GoogleDriveError::RateLimitExceeded {
                retry_after_seconds: Self::retry_after(response),
            },
            403 if rate_limited => GoogleDriveError::RateLimitExceeded {
                retry_after_seconds: Self::retry_after(response),
            },
            status_code => GoogleDriveError::ApiError {
                status_code,
                message,
            },
        }
    }

    fn retry_after(response: &HttpResponse) -> u64 {
        response
            .header("Retry-After")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Look up a file, following shortcuts to their target
    async fn resolve_metadata(
        &self,
        session: &ProviderUserSession,
        file_id: &str,
    ) -> Result<FileMetadata> {
        let mut current_id = file_id.to_string();

        for _ in 0..=MAX_SHORTCUT_HOPS {
            let file = self.fetch_file(session, &current_id).await?;
            if !file.is_shortcut() {
                return Ok(file.into_metadata());
            }

            let target_id = match file.shortcut_details.and_then(|d| d.target_id) {
                Some(target_id) => target_id,
                None => return Err(GoogleDriveError::InvalidShortcut { file_id: file.id }),
            };

            debug!(shortcut = %file.id, target = %target_id, "Following Drive shortcut");
            current_id = target_id;
        }

        Err(GoogleDriveError::ShortcutDepthExceeded {
            file_id: file_id.to_string(),
            hops: MAX_SHORTCUT_HOPS,
        })
    }
}

#[async_trait]
impl StorageProvider for GoogleDriveConnector {
    #[instrument(skip(self, session))]
    async fn get_file_metadata(
        &self,
        session: &ProviderUserSession,
        file_id: &str,
    ) -> bridge_traits::error::Result<FileMetadata> {
        let metadata = self.resolve_metadata(session, file_id).await?;
        debug!(mime_type = %metadata.mime_type, "Fetched Drive metadata");
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::BridgeError;
    use bytes::Bytes;
    use mockall::mock;
    use serde_json::json;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> bridge_traits::error::Result<HttpResponse>;
        }
    }

    fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    fn session() -> ProviderUserSession {
        ProviderUserSession::new("test-token")
    }

    fn image_metadata_json() -> serde_json::Value {
        json!({
            "width": 3840,
            "height": 2160,
            "rotation": 0,
            "location": {
                "latitude": 37.7749,
                "longitude": -122.4194,
                "altitude": 10.0
            },
            "time": "2024:01:15 10:30:00",
            "cameraMake": "Canon",
            "cameraModel": "EOS R5",
            "exposureTime": 0.008,
            "aperture": 2.8,
            "flashUsed": false,
            "focalLength": 50.0,
            "isoSpeed": 400,
            "meteringMode": "Pattern",
            "sensor": "One-chip color area sensor",
            "exposureMode": "Auto",
            "colorSpace": "sRGB",
            "whiteBalance": "Auto",
            "exposureBias": 0.0,
            "maxApertureValue": 2.8,
            "subjectDistance": 5,
            "lens": "RF 50mm F1.8 STM"
        })
    }

    #[tokio::test]
    async fn test_get_image_metadata() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .withf(|req| {
                req.method == HttpMethod::Get
                    && req.url.starts_with("https://www.googleapis.com/drive/v3/files/file123?")
                    && req.url.contains("supportsAllDrives=true")
                    && req.url.contains("fields=")
                    && req.headers.get("Authorization").map(String::as_str)
                        == Some("Bearer test-token")
            })
            .returning(|_| {
                Ok(json_response(
                    200,
                    json!({
                        "kind": "drive#file",
                        "id": "file123",
                        "name": "vacation.jpg",
                        "mimeType": "image/jpeg",
                        "size": "4567890",
                        "modifiedTime": "2024-01-15T10:30:00.000Z",
                        "thumbnailLink": "https://lh3.googleusercontent.com/thumb",
                        "imageMediaMetadata": image_metadata_json()
                    }),
                ))
            });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let metadata = connector
            .get_file_metadata(&session(), "file123")
            .await
            .unwrap();

        assert_eq!(metadata.id, "file123");
        assert_eq!(metadata.name, "vacation.jpg");
        assert_eq!(metadata.size.as_deref(), Some("4567890"));
        assert_eq!(
            metadata.thumbnail_link.as_deref(),
            Some("https://lh3.googleusercontent.com/thumb")
        );

        let image = metadata.image_media_metadata.clone().unwrap();
        assert_eq!(image.width, Some(3840));
        assert_eq!(image.camera_model.as_deref(), Some("EOS R5"));
        assert_eq!(image.location.unwrap().latitude, Some(37.7749));

        // EXIF block passes through unchanged
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["imageMediaMetadata"], image_metadata_json());
        assert!(value.get("kind").is_none());
        assert!(value.get("videoMediaMetadata").is_none());
    }

    #[tokio::test]
    async fn test_get_video_metadata() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                200,
                json!({
                    "kind": "drive#file",
                    "id": "video456",
                    "name": "clip.mp4",
                    "mimeType": "video/mp4",
                    "size": "52428800",
                    "modifiedTime": "2024-02-01T08:00:00.000Z",
                    "videoMediaMetadata": {
                        "width": 1920,
                        "height": 1080,
                        "durationMillis": "120000"
                    }
                }),
            ))
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let metadata = connector
            .get_file_metadata(&session(), "video456")
            .await
            .unwrap();

        let video = metadata.video_media_metadata.unwrap();
        assert_eq!(video.width, Some(1920));
        assert_eq!(video.height, Some(1080));
        assert_eq!(video.duration_millis.as_deref(), Some("120000"));
        assert!(metadata.image_media_metadata.is_none());
    }

    #[tokio::test]
    async fn test_shortcut_is_resolved_to_target() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(2).returning(|req| {
            if req.url.contains("/files/shortcut-123?") {
                Ok(json_response(
                    200,
                    json!({
                        "kind": "drive#file",
                        "id": "shortcut-123",
                        "name": "Shortcut to photo",
                        "mimeType": "application/vnd.google-apps.shortcut",
                        "shortcutDetails": {
                            "targetId": "target-file-123",
                            "targetMimeType": "image/jpeg"
                        }
                    }),
                ))
            } else if req.url.contains("/files/target-file-123?") {
                Ok(json_response(
                    200,
                    json!({
                        "kind": "drive#file",
                        "id": "target-file-123",
                        "name": "actual-photo.jpg",
                        "mimeType": "image/jpeg",
                        "size": "2048000",
                        "imageMediaMetadata": { "width": 4000, "height": 3000 }
                    }),
                ))
            } else {
                Ok(json_response(404, json!({})))
            }
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let metadata = connector
            .get_file_metadata(&session(), "shortcut-123")
            .await
            .unwrap();

        assert_eq!(metadata.id, "target-file-123");
        assert_eq!(metadata.name, "actual-photo.jpg");
        assert_eq!(metadata.mime_type, "image/jpeg");
        assert_eq!(metadata.size.as_deref(), Some("2048000"));

        let image = metadata.image_media_metadata.unwrap();
        assert_eq!(image.width, Some(4000));
        assert_eq!(image.height, Some(3000));
    }

    #[tokio::test]
    async fn test_shortcut_without_target_fails() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                200,
                json!({
                    "id": "broken-shortcut",
                    "name": "Broken",
                    "mimeType": "application/vnd.google-apps.shortcut"
                }),
            ))
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let result = connector
            .get_file_metadata(&session(), "broken-shortcut")
            .await;

        assert!(matches!(result, Err(BridgeError::OperationFailed(_))));
    }

    #[tokio::test]
    async fn test_shortcut_cycle_stops_after_max_hops() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(MAX_SHORTCUT_HOPS + 1)
            .returning(|_| {
                Ok(json_response(
                    200,
                    json!({
                        "id": "loop",
                        "name": "Loop",
                        "mimeType": "application/vnd.google-apps.shortcut",
                        "shortcutDetails": { "targetId": "loop" }
                    }),
                ))
            });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "loop")
            .await
            .unwrap_err();

        assert!(matches!(error, BridgeError::OperationFailed(_)));
        assert!(error.to_string().contains("did not resolve"));
    }

    #[tokio::test]
    async fn test_file_not_found() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                404,
                json!({
                    "error": {
                        "code": 404,
                        "message": "File not found: nonexistent.",
                        "errors": [
                            { "domain": "global", "reason": "notFound", "message": "File not found: nonexistent." }
                        ]
                    }
                }),
            ))
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "nonexistent")
            .await
            .unwrap_err();

        match error {
            BridgeError::ProviderApi {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 404);
                assert_eq!(message, "File not found: nonexistent.");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_not_found_without_body() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 404,
                headers: HashMap::new(),
                body: Bytes::new(),
            })
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "file123")
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Provider API error (status 404): File not found: file123"
        );
    }

    #[tokio::test]
    async fn test_forbidden_rate_limit_maps_to_429() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                403,
                json!({
                    "error": {
                        "code": 403,
                        "message": "User Rate Limit Exceeded",
                        "errors": [
                            { "domain": "usageLimits", "reason": "userRateLimitExceeded", "message": "User Rate Limit Exceeded" }
                        ]
                    }
                }),
            ))
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "file123")
            .await
            .unwrap_err();

        assert_eq!(error.status_code(), Some(429));
    }

    #[tokio::test]
    async fn test_forbidden_without_rate_limit_keeps_403() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                403,
                json!({
                    "error": {
                        "code": 403,
                        "message": "The user does not have sufficient permissions for this file.",
                        "errors": [
                            { "domain": "global", "reason": "insufficientFilePermissions" }
                        ]
                    }
                }),
            ))
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "file123")
            .await
            .unwrap_err();

        assert_eq!(error.status_code(), Some(403));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                401,
                json!({ "error": { "code": 401, "message": "Invalid Credentials" } }),
            ))
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "file123")
            .await
            .unwrap_err();

        match error {
            BridgeError::ProviderAuth(message) => assert_eq!(message, "Invalid Credentials"),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_reads_retry_after() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            let mut headers = HashMap::new();
            headers.insert("retry-after".to_string(), "7".to_string());
            Ok(HttpResponse {
                status: 429,
                headers,
                body: Bytes::new(),
            })
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "file123")
            .await
            .unwrap_err();

        assert_eq!(error.status_code(), Some(429));
        assert!(error.to_string().contains("7 seconds"));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status_and_raw_body() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 503,
                headers: HashMap::new(),
                body: Bytes::from_static(b"Service Unavailable"),
            })
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "file123")
            .await
            .unwrap_err();

        match error {
            BridgeError::ProviderApi {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_operation_failure() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 200,
                headers: HashMap::new(),
                body: Bytes::from_static(b"<html>not json</html>"),
            })
        });

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "file123")
            .await
            .unwrap_err();

        assert!(matches!(error, BridgeError::OperationFailed(_)));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::OperationFailed("connection reset".to_string())));

        let connector = GoogleDriveConnector::new(Arc::new(mock_http));
        let error = connector
            .get_file_metadata(&session(), "file123")
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Bridge operation failed: connection reset");
    }

    #[tokio::test]
    async fn test_file_id_is_url_encoded_and_base_is_trimmed() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .withf(|req| req.url.starts_with("http://127.0.0.1:9000/drive/v3/files/a%2Fb%20c?"))
            .returning(|_| {
                Ok(json_response(
                    200,
                    json!({ "id": "a/b c", "name": "odd", "mimeType": "text/plain" }),
                ))
            });

        let connector =
            GoogleDriveConnector::with_api_base(Arc::new(mock_http), "http://127.0.0.1:9000/drive/v3/");
        let metadata = connector.get_file_metadata(&session(), "a/b c").await.unwrap();

        assert_eq!(metadata.id, "a/b c");
    }
}
