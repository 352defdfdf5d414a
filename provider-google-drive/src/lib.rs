//! # Google Drive Provider
//!
//! Implements `StorageProvider` trait for Google Drive API v3.
//!
//! ## Overview
//!
//! This module provides:
//! - Single-file metadata lookup with image EXIF and video details
//! - Shortcut resolution to the target file
//! - Mapping of Drive error payloads onto `BridgeError` with the HTTP status kept

pub mod connector;
pub mod error;
pub mod types;

pub use connector::{GoogleDriveConnector, DRIVE_API_BASE, MAX_SHORTCUT_HOPS};
pub use error::{GoogleDriveError, Result};
