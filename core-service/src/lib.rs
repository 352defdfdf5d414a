//! Core service façade and HTTP surface.
//!
//! This crate wires the provider connectors into an axum [`Router`]. Each
//! provider is mounted under its own prefix with its own state:
//!
//! - `GET /drive/metadata/{id}` (Google Drive)
//! - `GET /onedrive/metadata/{id}` (OneDrive)
//! - `GET /healthz`
//!
//! The caller's provider access token travels in the `Authorization: Bearer`
//! header (see [`session::Session`]).

pub mod error;
pub mod handlers;
pub mod session;

pub use error::{respond_with_error, CoreError, Result};

use std::sync::Arc;

use axum::{routing::get, Router};
use bridge_traits::storage::StorageProvider;
use core_runtime::config::CompanionConfig;
use provider_google_drive::GoogleDriveConnector;
use provider_onedrive::OneDriveConnector;
use tower_http::trace::TraceLayer;

/// Primary façade exposed to the server binary.
#[derive(Clone)]
pub struct CoreService {
    drive: Arc<dyn StorageProvider>,
    onedrive: Arc<dyn StorageProvider>,
}

impl CoreService {
    /// Create a new service from explicit provider handles.
    pub fn new(drive: Arc<dyn StorageProvider>, onedrive: Arc<dyn StorageProvider>) -> Self {
        Self { drive, onedrive }
    }

    /// Build both connectors from the configured transport and base URLs.
    pub fn from_config(config: &CompanionConfig) -> Self {
        let drive = GoogleDriveConnector::with_api_base(
            Arc::clone(&config.http_client),
            config.drive_api_base.as_str(),
        );
        let onedrive = OneDriveConnector::with_api_base(
            Arc::clone(&config.http_client),
            config.onedrive_api_base.as_str(),
        );
        Self::new(Arc::new(drive), Arc::new(onedrive))
    }

    /// Assemble the application router.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/healthz", get(handlers::healthz))
            .nest("/drive", provider_router(Arc::clone(&self.drive)))
            .nest("/onedrive", provider_router(Arc::clone(&self.onedrive)))
            .layer(TraceLayer::new_for_http())
    }
}

/// Routes served by every provider, bound to that provider's connector.
pub fn provider_router(provider: Arc<dyn StorageProvider>) -> Router {
    Router::new()
        .route("/metadata/{id}", get(handlers::get_file_metadata))
        .with_state(provider)
}
