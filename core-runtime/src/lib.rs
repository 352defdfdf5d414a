//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the metadata service:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other crates depend on. It
//! establishes the configuration contract (with fail-fast validation) and the
//! logging conventions used throughout the workspace.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
