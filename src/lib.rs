//! Workspace placeholder crate.
//!
//! This crate exposes shared feature flags that map to the individual
//! workspace crates. Host applications can depend on `companion-workspace`
//! and enable `desktop-shims` to get the metadata service wired with the
//! reqwest-backed HTTP client, without pulling each crate in by hand.

#[cfg(feature = "desktop-shims")]
pub use core_service as service;
