//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod app_settings;
pub mod catalog_file;
pub mod clock;
pub mod memory_store;
pub mod ports;
pub mod ticker;
