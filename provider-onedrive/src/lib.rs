//! # OneDrive Provider
//!
//! Implements `StorageProvider` trait for Microsoft Graph API (OneDrive).
//!
//! ## Overview
//!
//! This module provides:
//! - `driveItem` lookup with thumbnails expanded
//! - Resolution of items shared from another drive (`remoteItem`)
//! - Normalization of Graph facets into the shared metadata shape

pub mod connector;
pub mod error;
pub mod types;

pub use connector::{OneDriveConnector, GRAPH_API_BASE};
pub use error::{OneDriveError, Result};
