//! Microsoft Graph `driveItem` types and their normalization

use bridge_traits::storage::{
    FileMetadata, ImageMediaMetadata, MediaLocation, VideoMediaMetadata,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

/// MIME type reported when Graph has no `file` facet
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Graph `driveItem` resource, limited to the facets used for metadata
///
/// See: https://learn.microsoft.com/graph/api/resources/driveitem
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub size: Option<u64>,

    #[serde(default)]
    pub last_modified_date_time: Option<String>,

    #[serde(default)]
    pub file: Option<FileFacet>,

    #[serde(default)]
    pub image: Option<ImageFacet>,

    #[serde(default)]
    pub photo: Option<PhotoFacet>,

    #[serde(default)]
    pub location: Option<GeoCoordinates>,

    #[serde(default)]
    pub video: Option<VideoFacet>,

    #[serde(default)]
    pub thumbnails: Vec<ThumbnailSet>,

    /// Set when the item lives in another user's drive
    #[serde(default)]
    pub remote_item: Option<RemoteItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacet {
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageFacet {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// EXIF-derived photo facet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFacet {
    #[serde(default)]
    pub camera_make: Option<String>,
    #[serde(default)]
    pub camera_model: Option<String>,
    #[serde(default)]
    pub exposure_denominator: Option<f64>,
    #[serde(default)]
    pub exposure_numerator: Option<f64>,
    #[serde(default)]
    pub f_number: Option<f64>,
    #[serde(default)]
    pub focal_length: Option<f64>,
    #[serde(default)]
    pub iso: Option<i32>,
    #[serde(default)]
    pub orientation: Option<i32>,
    #[serde(default)]
    pub taken_date_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoCoordinates {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub altitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoFacet {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,

    /// Duration in milliseconds
    #[serde(default)]
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailSet {
    #[serde(default)]
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteItem {
    pub id: String,

    #[serde(default)]
    pub parent_reference: Option<ItemReference>,
}

impl RemoteItem {
    pub fn drive_id(&self) -> Option<&str> {
        self.parent_reference
            .as_ref()
            .and_then(|r| r.drive_id.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReference {
    #[serde(default)]
    pub drive_id: Option<String>,
}

/// Graph error envelope
#[derive(Debug, Deserialize)]
pub struct GraphErrorResponse {
    pub error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct GraphErrorBody {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: String,
}

impl DriveItem {
    /// Reshape into the provider-agnostic metadata object
    pub fn into_metadata(self) -> FileMetadata {
        let image_media_metadata =
            image_metadata(self.image.as_ref(), self.photo.as_ref(), self.location.as_ref());
        let video_media_metadata = self.video.as_ref().map(|video| VideoMediaMetadata {
            width: video.width,
            height: video.height,
            duration_millis: video.duration.map(|d| d.to_string()),
        });
        let thumbnail_link = self
            .thumbnails
            .into_iter()
            .next()
            .and_then(|set| set.medium)
            .map(|thumb| thumb.url);

        FileMetadata {
            id: self.id,
            name: self.name,
            mime_type: self
                .file
                .and_then(|f| f.mime_type)
                .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string()),
            size: self.size.map(|s| s.to_string()),
            modified_time: self.last_modified_date_time.map(|t| normalize_timestamp(&t)),
            thumbnail_link,
            image_media_metadata,
            video_media_metadata,
        }
    }
}

/// Render a Graph timestamp as RFC 3339 UTC with millisecond precision
///
/// Unparseable input is returned unchanged.
pub fn normalize_timestamp(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        })
        .unwrap_or_else(|_| value.to_string())
}

/// Map an EXIF orientation tag onto clockwise quarter turns
fn rotation_from_orientation(orientation: i32) -> i32 {
    match orientation {
        3 => 2,
        6 => 1,
        8 => 3,
        _ => 0,
    }
}

fn image_metadata(
    image: Option<&ImageFacet>,
    photo: Option<&PhotoFacet>,
    location: Option<&GeoCoordinates>,
) -> Option<ImageMediaMetadata> {
    if image.is_none() && photo.is_none() && location.is_none() {
        return None;
    }

    let photo = photo.cloned().unwrap_or_default();
    let exposure_time = match (photo.exposure_numerator, photo.exposure_denominator) {
        (Some(numerator), Some(denominator)) if denominator != 0.0 => {
            Some(numerator / denominator)
        }
        _ => None,
    };

    Some(ImageMediaMetadata {
        width: image.and_then(|i| i.width),
        height: image.and_then(|i| i.height),
        rotation: photo.orientation.map(rotation_from_orientation),
        location: location.map(|l| MediaLocation {
            latitude: l.latitude,
            longitude: l.longitude,
            altitude: l.altitude,
        }),
        time: photo.taken_date_time,
        camera_make: photo.camera_make,
        camera_model: photo.camera_model,
        exposure_time,
        aperture: photo.f_number,
        focal_length: photo.focal_length,
        iso_speed: photo.iso,
        ..Default::default()
    })
}
