//! Microsoft Graph connector implementing `StorageProvider` for OneDrive

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::{FileMetadata, ProviderUserSession, StorageProvider};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::{OneDriveError, Result};
use crate::types::{DriveItem, GraphErrorResponse};

/// Microsoft Graph base URL
pub const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0";

/// OneDrive connector backed by Microsoft Graph
///
/// Items shared from another drive come back as a `remoteItem` pointer; the
/// connector follows that pointer once and returns the remote item's
/// metadata.
pub struct OneDriveConnector {
    http_client: Arc<dyn HttpClient>,
    api_base: String,
}

impl OneDriveConnector {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_api_base(http_client, GRAPH_API_BASE)
    }

    pub fn with_api_base(http_client: Arc<dyn HttpClient>, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            api_base,
        }
    }

    fn item_url(&self, item_id: &str) -> String {
        format!(
            "{}/me/drive/items/{}?$expand=thumbnails",
            self.api_base,
            urlencoding::encode(item_id)
        )
    }

    fn remote_item_url(&self, drive_id: &str, item_id: &str) -> String {
        format!(
            "{}/drives/{}/items/{}?$expand=thumbnails",
            self.api_base,
            urlencoding::encode(drive_id),
            urlencoding::encode(item_id)
        )
    }

    #[instrument(skip(self, session))]
    async fn fetch_item(&self, session: &ProviderUserSession, url: String) -> Result<DriveItem> {
        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer_token(session.access_token())
            .header("Accept", "application/json");

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            let error = Self::error_from_response(&response);
            warn!(status = response.status, error = %error, "Graph request failed");
            return Err(error);
        }

        serde_json::from_slice(&response.body).map_err(|e| OneDriveError::ParseError(e.to_string()))
    }

    fn error_from_response(response: &HttpResponse) -> OneDriveError {
        let message = serde_json::from_slice::<GraphErrorResponse>(&response.body)
            .ok()
            .map(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| String::from_utf8_lossy(&response.body).trim().to_string());

        match response.status {
            401 => OneDriveError::AuthenticationFailed(message),
            429 => OneDriveError::Throttled(
                response
                    .header("Retry-After")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(0),
            ),
            status_code => OneDriveError::ApiError {
                status_code,
                message,
            },
        }
    }

    async fn resolve_metadata(
        &self,
        session: &ProviderUserSession,
        item_id: &str,
    ) -> Result<FileMetadata> {
        let mut item = self.fetch_item(session, self.item_url(item_id)).await?;

        let remote = match item.remote_item.take() {
            Some(remote) => remote,
            None => return Ok(item.into_metadata()),
        };

        let drive_id = remote
            .drive_id()
            .ok_or_else(|| OneDriveError::InvalidRemoteItem {
                item_id: remote.id.clone(),
            })?;

        debug!(item = %item.id, remote = %remote.id, drive = %drive_id, "Following remote item");
        let target = self
            .fetch_item(session, self.remote_item_url(drive_id, &remote.id))
            .await?;

        Ok(target.into_metadata())
    }
}

#[async_trait]
impl StorageProvider for OneDriveConnector {
    #[instrument(skip(self, session))]
    async fn get_file_metadata(
        &self,
        session: &ProviderUserSession,
        file_id: &str,
    ) -> bridge_traits::error::Result<FileMetadata> {
        Ok(self.resolve_metadata(session, file_id).await?)
    }
}
