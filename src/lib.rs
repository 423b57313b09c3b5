//! Hidro Registry Library
//!
//! A Rust library for decoding hydroelectric plant registry files as used by
//! hydrothermal dispatch studies, in either of their two on-disk layouts.
//!
//! This library provides tools for:
//! - Detecting whether a registry file is binary or text without relying on
//!   its name or extension
//! - Decoding the headerless fixed-record binary layout
//! - Decoding the multi-block fixed-width text layout with its auxiliary
//!   data blocks
//! - Indexing decoded plants for O(1) lookup by plant number
//! - Building and querying the river cascade topology implied by the
//!   downstream references

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod binary_decoder;
        pub mod cascade;
        pub mod field_extract;
        pub mod format_detector;
        pub mod registry;
        pub mod text_decoder;

        #[cfg(test)]
        mod integration_test;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Plant, SourceFormat};
pub use app::services::cascade::CascadeGraph;
pub use app::services::registry::{PlantRegistry, parse_registry_file};
pub use error::{RegistryError, Result};
