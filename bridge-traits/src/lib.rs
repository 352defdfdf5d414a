//! # Host Bridge Traits
//!
//! Capability traits shared by the metadata service and its providers.
//!
//! ## Overview
//!
//! This crate defines the contract between the HTTP service, the provider
//! connectors and the transport they run on. Each trait represents a
//! capability that is implemented separately from the code that uses it, so
//! connectors can be tested against mocks and the server can swap transports.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP transport used by connectors
//! - [`StorageProvider`](storage::StorageProvider) - Per-backend file metadata lookup
//!
//! ## Data
//!
//! - [`FileMetadata`](storage::FileMetadata) - Normalized metadata returned to clients
//! - [`ProviderUserSession`](storage::ProviderUserSession) - Per-request credentials
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Provider
//! implementations should:
//!
//! - Preserve upstream HTTP statuses in `BridgeError::ProviderApi`
//! - Report rejected credentials as `BridgeError::ProviderAuth`
//! - Use `BridgeError::OperationFailed` for everything that has no HTTP meaning
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so implementations can be
//! shared across request handlers behind an `Arc`.
//!
//! ## Examples
//!
//! ### Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         // Implementation
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use storage::{
    FileMetadata, ImageMediaMetadata, MediaLocation, ProviderUserSession, StorageProvider,
    VideoMediaMetadata,
};
