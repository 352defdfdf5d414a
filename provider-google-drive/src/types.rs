//! Google Drive API response types
//!
//! Data structures for deserializing Google Drive API v3 responses.

use bridge_traits::storage::{FileMetadata, ImageMediaMetadata, VideoMediaMetadata};
use serde::Deserialize;

/// MIME type Drive assigns to shortcut items
pub const SHORTCUT_MIME_TYPE: &str = "application/vnd.google-apps.shortcut";

/// Google Drive API file resource
///
/// Only the fields requested by the connector are modelled.
///
/// See: https://developers.google.com/drive/api/v3/reference/files#resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// Resource kind, always `drive#file`
    #[serde(default)]
    pub kind: Option<String>,

    /// File ID
    pub id: String,

    /// File name
    pub name: String,

    /// MIME type
    pub mime_type: String,

    /// File size in bytes (omitted for folders and Google Docs)
    #[serde(default)]
    pub size: Option<String>,

    /// Modification time (RFC 3339)
    #[serde(default)]
    pub modified_time: Option<String>,

    #[serde(default)]
    pub icon_link: Option<String>,

    /// Short-lived thumbnail URL
    #[serde(default)]
    pub thumbnail_link: Option<String>,

    /// EXIF and image details (images only)
    #[serde(default)]
    pub image_media_metadata: Option<ImageMediaMetadata>,

    /// Dimensions and duration (videos only)
    #[serde(default)]
    pub video_media_metadata: Option<VideoMediaMetadata>,

    /// Target of the shortcut (shortcuts only)
    #[serde(default)]
    pub shortcut_details: Option<ShortcutDetails>,
}

impl DriveFile {
    /// Whether this item is a shortcut pointing at another file
    pub fn is_shortcut(&self) -> bool {
        self.mime_type == SHORTCUT_MIME_TYPE
    }

    /// Reshape into the provider-agnostic metadata object
    pub fn into_metadata(self) -> FileMetadata {
        FileMetadata {
            id: self.id,
            name: self.name,
            mime_type: self.mime_type,
            size: self.size,
            modified_time: self.modified_time,
            thumbnail_link: self.thumbnail_link,
            image_media_metadata: self.image_media_metadata,
            video_media_metadata: self.video_media_metadata,
        }
    }
}

/// Shortcut target information
///
/// See: https://developers.google.com/drive/api/guides/shortcuts
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutDetails {
    #[serde(default)]
    pub target_id: Option<String>,

    #[serde(default)]
    pub target_mime_type: Option<String>,
}

/// Google API error envelope
///
/// See: https://developers.google.com/drive/api/guides/handle-errors
#[derive(Debug, Deserialize)]
pub struct DriveErrorResponse {
    pub error: DriveErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct DriveErrorBody {
    #[serde(default)]
    pub code: Option<u16>,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub errors: Vec<DriveErrorItem>,
}

impl DriveErrorBody {
    /// Whether Drive reported a quota or rate limit (sent as 403 or 429)
    pub fn is_rate_limited(&self) -> bool {
        self.errors.iter().any(|e| {
            matches!(
                e.reason.as_deref(),
                Some("rateLimitExceeded") | Some("userRateLimitExceeded")
            )
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DriveErrorItem {
    #[serde(default)]
    pub domain: Option<String>,

    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}
