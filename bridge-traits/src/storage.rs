//! Storage Provider Abstractions
//!
//! Provides the provider-agnostic metadata shape and the `StorageProvider`
//! trait implemented once per cloud backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Normalized metadata for a single remote file.
///
/// Every provider reshapes its own API response into this structure, so
/// clients see the same JSON regardless of backend. Optional fields that the
/// provider did not return are omitted from the serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,

    pub name: String,

    pub mime_type: String,

    /// Size in bytes, as decimal text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Last modification time (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_media_metadata: Option<ImageMediaMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_media_metadata: Option<VideoMediaMetadata>,
}

/// Image and EXIF details of a photo.
///
/// Field names and units follow the Google Drive `imageMediaMetadata`
/// resource; other providers convert into them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMediaMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Number of clockwise 90-degree rotations applied from the original
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<MediaLocation>,

    /// Capture time, as recorded in the EXIF data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_make: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_model: Option<String>,

    /// Exposure duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<f64>,

    /// Aperture (f-number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_used: Option<bool>,

    /// Focal length in millimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_speed: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metering_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_balance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_bias: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_aperture_value: Option<f64>,

    /// Distance to the subject in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_distance: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
}

/// Geographic location stored with a photo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

/// Video dimensions and duration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMediaMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Duration in milliseconds, as decimal text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_millis: Option<String>,
}

/// Per-request provider session.
///
/// Holds the credentials a connector needs to act on behalf of the user.
///
/// # Security
///
/// The `Debug` implementation redacts the access token.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderUserSession {
    access_token: String,
}

impl ProviderUserSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// OAuth 2.0 access token sent as the bearer credential
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for ProviderUserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderUserSession")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Cloud storage provider trait
///
/// One implementation exists per backend (Google Drive, OneDrive). Each
/// performs the remote lookup with the caller's session and reshapes the
/// response into [`FileMetadata`].
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::{ProviderUserSession, StorageProvider};
///
/// async fn describe(provider: &dyn StorageProvider) -> Result<String> {
///     let session = ProviderUserSession::new("ya29.token");
///     let metadata = provider.get_file_metadata(&session, "file123").await?;
///     Ok(metadata.mime_type)
/// }
/// ```
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Fetch normalized metadata for `file_id`.
    ///
    /// Pointer items (Drive shortcuts, OneDrive remote items) are resolved
    /// and the metadata of the item they point to is returned.
    ///
    /// # Errors
    ///
    /// Non-success responses from the provider surface as
    /// [`BridgeError::ProviderApi`](crate::error::BridgeError::ProviderApi) or
    /// [`BridgeError::ProviderAuth`](crate::error::BridgeError::ProviderAuth).
    async fn get_file_metadata(
        &self,
        session: &ProviderUserSession,
        file_id: &str,
    ) -> Result<FileMetadata>;
}
